//! Sort keys recognized by `sort_by` on team and player services.
//!
//! Key names are matched case-insensitively; unknown names fall back to
//! ordering by identifier. String fields compare case-insensitively over
//! ASCII letters, the same folding the repositories use.

use crate::model::player::Player;
use crate::model::team::Team;
use std::cmp::Ordering;

/// Team ordering keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSortKey {
    Name,
    Sport,
    Coach,
    Location,
    FoundedYear,
    Id,
}

impl TeamSortKey {
    pub fn parse(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            "sport" => Self::Sport,
            "coach" => Self::Coach,
            "location" => Self::Location,
            "foundedyear" | "founded_year" => Self::FoundedYear,
            _ => Self::Id,
        }
    }

    pub fn compare(self, a: &Team, b: &Team) -> Ordering {
        match self {
            Self::Name => cmp_ignore_case(&a.name, &b.name),
            Self::Sport => cmp_ignore_case(&a.sport, &b.sport),
            Self::Coach => cmp_ignore_case(&a.coach, &b.coach),
            Self::Location => cmp_ignore_case(&a.location, &b.location),
            // Teams without a year sort first.
            Self::FoundedYear => a.founded_year.cmp(&b.founded_year),
            Self::Id => a.id.cmp(&b.id),
        }
    }
}

/// Player ordering keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSortKey {
    /// Last name, then first name.
    Name,
    Age,
    Position,
    Rating,
    Id,
}

impl PlayerSortKey {
    pub fn parse(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            "age" => Self::Age,
            "position" => Self::Position,
            "rating" => Self::Rating,
            _ => Self::Id,
        }
    }

    pub fn compare(self, a: &Player, b: &Player) -> Ordering {
        match self {
            Self::Name => cmp_ignore_case(&a.last_name, &b.last_name)
                .then_with(|| cmp_ignore_case(&a.first_name, &b.first_name)),
            Self::Age => a.age.cmp(&b.age),
            Self::Position => cmp_ignore_case(&a.position, &b.position),
            Self::Rating => a.rating.total_cmp(&b.rating),
            Self::Id => a.id.cmp(&b.id),
        }
    }
}

/// Stable sort of a snapshot copy; descending reverses the comparator so
/// equal keys keep snapshot order either way.
pub(crate) fn sorted<T, F>(items: &[T], ascending: bool, compare: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let mut items = items.to_vec();
    if ascending {
        items.sort_by(|a, b| compare(a, b));
    } else {
        items.sort_by(|a, b| compare(b, a));
    }
    items
}

/// Folds ASCII letters only, matching SQLite `COLLATE NOCASE` so cached sorts
/// agree with the repository's default order.
fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|byte| byte.to_ascii_lowercase())
        .cmp(b.bytes().map(|byte| byte.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::{cmp_ignore_case, sorted, PlayerSortKey, TeamSortKey};
    use std::cmp::Ordering;

    #[test]
    fn keys_parse_case_insensitively_with_id_fallback() {
        assert_eq!(TeamSortKey::parse("FoundedYear"), TeamSortKey::FoundedYear);
        assert_eq!(TeamSortKey::parse(" NAME "), TeamSortKey::Name);
        assert_eq!(TeamSortKey::parse("budget"), TeamSortKey::Id);
        assert_eq!(PlayerSortKey::parse("Rating"), PlayerSortKey::Rating);
        assert_eq!(PlayerSortKey::parse(""), PlayerSortKey::Id);
    }

    #[test]
    fn string_comparison_ignores_case() {
        assert_eq!(cmp_ignore_case("alpha", "ALPHA"), Ordering::Equal);
        assert_eq!(cmp_ignore_case("alpha", "Beta"), Ordering::Less);
        assert_eq!(cmp_ignore_case("Zulu", "beta"), Ordering::Greater);
    }

    #[test]
    fn non_ascii_letters_compare_by_byte_like_nocase() {
        // 'É' (0xC3 0x89) is not folded, so it sorts after every ASCII letter.
        assert_eq!(cmp_ignore_case("Émile", "zoe"), Ordering::Greater);
        assert_eq!(cmp_ignore_case("émile", "Émile"), Ordering::Greater);
        assert_eq!(cmp_ignore_case("ÉMILE", "Émile"), Ordering::Equal);
    }

    #[test]
    fn descending_keeps_ties_in_input_order() {
        let items = [(1, 'a'), (2, 'b'), (1, 'c')];
        let by_key = |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0);

        let asc = sorted(&items, true, by_key);
        assert_eq!(asc, vec![(1, 'a'), (1, 'c'), (2, 'b')]);

        let desc = sorted(&items, false, by_key);
        assert_eq!(desc, vec![(2, 'b'), (1, 'a'), (1, 'c')]);
    }
}
