pub mod db;
pub mod share_image;
