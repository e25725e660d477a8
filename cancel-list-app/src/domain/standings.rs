use super::Item;
use serde::{Deserialize, Serialize};

pub const TOP_COUNT: usize = 10;
pub const RUNNER_UP_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedItem {
    pub rank: usize,
    pub item: Item,
}

impl RankedItem {
    pub fn style(&self) -> RankStyle {
        RankStyle::for_rank(self.rank)
    }
}

/// Ranked items split into the styled top ten and the runner-ups.
/// Anything past rank 15 is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub top: Vec<RankedItem>,
    pub runner_ups: Vec<RankedItem>,
}

impl Standings {
    /// `items` must already be in leaderboard order.
    pub fn from_ranked(items: Vec<Item>) -> Self {
        let mut standings = Self::default();
        for (index, item) in items
            .into_iter()
            .take(TOP_COUNT + RUNNER_UP_COUNT)
            .enumerate()
        {
            let ranked = RankedItem {
                rank: index + 1,
                item,
            };
            if ranked.rank <= TOP_COUNT {
                standings.top.push(ranked);
            } else {
                standings.runner_ups.push(ranked);
            }
        }
        standings
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.runner_ups.is_empty()
    }
}

/// Visual treatment of one leaderboard row, as CSS values.
#[derive(Debug, Clone, PartialEq)]
pub struct RankStyle {
    pub border: String,
    pub background: String,
    pub box_shadow: String,
    pub badge_bg: String,
    pub badge_border: String,
    pub badge_text: String,
    pub flair: &'static str,
}

const GREEN: (f64, f64, f64) = (60.0, 255.0, 160.0);
const BLUE: (f64, f64, f64) = (80.0, 160.0, 255.0);

impl RankStyle {
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1 => Self {
                border: "1px solid rgba(255, 215, 0, 0.65)".into(),
                background: "linear-gradient(90deg, rgba(255, 140, 0, 0.12) 0%, rgba(255, 215, 0, 0.10) 40%, rgba(255, 255, 255, 0.04) 100%)".into(),
                box_shadow: "0 0 0 1px rgba(255, 215, 0, 0.20), 0 10px 30px rgba(255, 140, 0, 0.10)".into(),
                badge_bg: "rgba(255, 215, 0, 0.16)".into(),
                badge_border: "1px solid rgba(255, 215, 0, 0.55)".into(),
                badge_text: "rgba(255, 235, 160, 1)".into(),
                flair: "🔥",
            },
            2 => Self {
                border: "1px solid rgba(255, 120, 50, 0.55)".into(),
                background: "linear-gradient(90deg, rgba(255, 80, 0, 0.10) 0%, rgba(255, 140, 0, 0.08) 45%, rgba(255, 255, 255, 0.04) 100%)".into(),
                box_shadow: "0 0 0 1px rgba(255, 120, 50, 0.16), 0 10px 26px rgba(255, 80, 0, 0.08)".into(),
                badge_bg: "rgba(255, 120, 50, 0.12)".into(),
                badge_border: "1px solid rgba(255, 120, 50, 0.40)".into(),
                badge_text: "rgba(255, 190, 155, 1)".into(),
                flair: "🔥",
            },
            3 => Self {
                border: "1px solid rgba(255, 60, 60, 0.55)".into(),
                background: "linear-gradient(90deg, rgba(255, 35, 35, 0.10) 0%, rgba(255, 60, 60, 0.06) 55%, rgba(255, 255, 255, 0.04) 100%)".into(),
                box_shadow: "0 0 0 1px rgba(255, 60, 60, 0.14), 0 10px 24px rgba(255, 35, 35, 0.07)".into(),
                badge_bg: "rgba(255, 60, 60, 0.10)".into(),
                badge_border: "1px solid rgba(255, 60, 60, 0.40)".into(),
                badge_text: "rgba(255, 185, 185, 1)".into(),
                flair: "🔥",
            },
            4..=TOP_COUNT => Self::gradient(rank),
            _ => Self::neutral(),
        }
    }

    // 4 is fully green at alpha 0.40, 10 is fully blue at alpha 0.08.
    fn gradient(rank: usize) -> Self {
        let t = ((rank as f64 - 4.0) / 6.0).clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
        let (r, g, b) = (
            mix(GREEN.0, BLUE.0),
            mix(GREEN.1, BLUE.1),
            mix(GREEN.2, BLUE.2),
        );
        let alpha = 0.40 - t * 0.32;
        let rgba = |a: f64| format!("rgba({r}, {g}, {b}, {a:.3})");

        Self {
            border: format!("1px solid {}", rgba(alpha)),
            background: format!(
                "linear-gradient(90deg, {} 0%, rgba(255,255,255,0.04) 85%)",
                rgba(alpha * 0.22)
            ),
            box_shadow: format!("0 0 0 1px {}, 0 8px 20px rgba(0,0,0,0.22)", rgba(alpha * 0.10)),
            badge_bg: rgba(alpha * 0.18),
            badge_border: format!("1px solid {}", rgba(alpha * 0.55)),
            badge_text: rgba((alpha + 0.25).min(1.0)),
            flair: if rank <= 5 { "✨" } else { "" },
        }
    }

    pub fn neutral() -> Self {
        Self {
            border: "1px solid rgba(255,255,255,0.12)".into(),
            background: "rgba(255,255,255,0.03)".into(),
            box_shadow: "none".into(),
            badge_bg: "rgba(255,255,255,0.06)".into(),
            badge_border: "1px solid rgba(255,255,255,0.14)".into(),
            badge_text: "rgba(255,255,255,0.75)".into(),
            flair: "",
        }
    }

    pub fn row_css(&self) -> String {
        format!(
            "border: {}; background: {}; box-shadow: {};",
            self.border, self.background, self.box_shadow
        )
    }

    pub fn badge_css(&self) -> String {
        format!(
            "background: {}; border: {}; color: {};",
            self.badge_bg, self.badge_border, self.badge_text
        )
    }

    pub fn badge_label(&self, rank: usize) -> String {
        if self.flair.is_empty() {
            format!("#{rank}")
        } else {
            format!("{} #{rank}", self.flair)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(format!("i{i}"), format!("Item {i}"), (n - i) as u64))
            .collect()
    }

    #[test]
    fn test_split_top_ten_and_runner_ups() {
        let standings = Standings::from_ranked(items(20));
        assert_eq!(standings.top.len(), 10);
        assert_eq!(standings.runner_ups.len(), 5);
        assert_eq!(standings.top[0].rank, 1);
        assert_eq!(standings.runner_ups[0].rank, 11);
        assert_eq!(standings.runner_ups[4].rank, 15);
        assert_eq!(standings.runner_ups[4].item.id, "i14");
    }

    #[test]
    fn test_short_list_has_no_runner_ups() {
        let standings = Standings::from_ranked(items(3));
        assert_eq!(standings.top.len(), 3);
        assert!(standings.runner_ups.is_empty());
        assert!(Standings::from_ranked(Vec::new()).is_empty());
    }

    #[test]
    fn test_podium_has_flame_flair() {
        for rank in 1..=3 {
            assert_eq!(RankStyle::for_rank(rank).flair, "🔥");
        }
        assert_eq!(RankStyle::for_rank(4).flair, "✨");
        assert_eq!(RankStyle::for_rank(5).flair, "✨");
        assert_eq!(RankStyle::for_rank(6).flair, "");
    }

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(
            RankStyle::for_rank(4).border,
            "1px solid rgba(60, 255, 160, 0.400)"
        );
        assert_eq!(
            RankStyle::for_rank(10).border,
            "1px solid rgba(80, 160, 255, 0.080)"
        );
    }

    #[test]
    fn test_runner_ups_are_neutral_and_style_is_deterministic() {
        assert_eq!(RankStyle::for_rank(11), RankStyle::neutral());
        assert_eq!(RankStyle::for_rank(15), RankStyle::neutral());
        assert_eq!(RankStyle::for_rank(7), RankStyle::for_rank(7));
    }

    #[test]
    fn test_badge_label() {
        assert_eq!(RankStyle::for_rank(1).badge_label(1), "🔥 #1");
        assert_eq!(RankStyle::for_rank(12).badge_label(12), "#12");
    }
}
