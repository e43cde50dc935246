//! Ordered pattern-matching rule table.
//!
//! A rule pairs a 3×3 template of [`Pattern`] entries with the state the
//! center cell becomes when every entry matches its neighborhood position.
//! Rules are evaluated in table order and the first full match wins, so the
//! order of the built-in table is part of its meaning.

use crate::cell::{Cell, Pattern};
use crate::grid::Grid;
use crate::neighborhood;

/// A 3×3 neighborhood template plus the output state it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pattern: [[Pattern; 3]; 3],
    output: Cell,
}

impl Rule {
    /// Creates a rule from a row-major template (center at `[1][1]`) and the
    /// state it produces.
    pub fn new(pattern: [[Pattern; 3]; 3], output: Cell) -> Self {
        Self { pattern, output }
    }

    /// Returns the state this rule produces.
    #[inline]
    pub fn output(&self) -> Cell {
        self.output
    }

    /// Tests all nine template entries against the clamped neighborhood of
    /// `(x, y)`.
    pub fn matches(&self, grid: &Grid, x: usize, y: usize) -> bool {
        neighborhood::moore(x, y, grid.size())
            .iter()
            .enumerate()
            .all(|(i, &(cx, cy))| self.pattern[i / 3][i % 3].matches(grid.get(cx, cy)))
    }
}

/// An immutable, order-significant list of rules.
///
/// Built once at startup and passed by reference into the transition pass;
/// nothing ever mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Creates a table from an ordered list of rules.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Returns the number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the output of the first rule whose template fully matches the
    /// neighborhood of `(x, y)`, if any.
    pub fn find_match(&self, grid: &Grid, x: usize, y: usize) -> Option<Cell> {
        self.rules
            .iter()
            .find(|rule| rule.matches(grid, x, y))
            .map(Rule::output)
    }

    /// Builds the built-in reaction table.
    ///
    /// The groups, in evaluation order: substance dissolving into solvent,
    /// solvent column growth, solvent channel churn, solvent thinning from the
    /// right, weakness onset near toxic particles, blood regrowth where
    /// weakness clusters, and oxygen recovery.
    pub fn reactions() -> Self {
        use Cell::*;
        const A: Pattern = Pattern::Any;
        const C: Pattern = Pattern::Is(Cavity);
        const F: Pattern = Pattern::Is(Substance);
        const W: Pattern = Pattern::Is(Solvent);
        const T: Pattern = Pattern::Is(Toxic);
        const O: Pattern = Pattern::Is(Oxygen);
        const B: Pattern = Pattern::Is(Blood);
        const K: Pattern = Pattern::Is(Weak);
        const NF: Pattern = Pattern::AnyBut(Substance);
        const NT: Pattern = Pattern::AnyBut(Toxic);

        Self::new(vec![
            // A substance particle touching solvent dissolves into it.
            Rule::new([[C, F, W], [C, C, C], [C, C, C]], Solvent),
            Rule::new([[C, C, C], [C, C, C], [C, F, W]], Solvent),
            Rule::new([[A, C, W], [A, NF, C], [A, C, W]], Solvent),
            // Grow three-cell solvent columns.
            Rule::new([[C, C, C], [C, C, W], [C, W, C]], Solvent),
            Rule::new([[C, W, C], [C, C, W], [C, C, C]], Solvent),
            // Churn inside a solvent channel.
            Rule::new([[C, C, W], [C, C, W], [C, C, W]], Solvent),
            Rule::new([[C, W, A], [A, W, A], [C, W, A]], Cavity),
            Rule::new([[C, C, C], [W, W, W], [C, C, C]], Cavity),
            Rule::new([[W, C, W], [C, C, C], [W, C, W]], Solvent),
            Rule::new([[W, C, C], [C, W, C], [W, C, C]], Cavity),
            Rule::new([[W, C, A], [C, W, C], [W, C, A]], Cavity),
            // Thin solvent out from the right edge.
            Rule::new([[C, C, C], [C, W, C], [W, C, C]], Cavity),
            Rule::new([[A, A, C], [W, W, C], [A, A, C]], Cavity),
            // Weakness onset next to toxic particles and starved oxygen.
            Rule::new([[A, A, A], [A, NT, A], [T, O, A]], Weak),
            Rule::new([[A, A, T], [A, O, T], [A, A, A]], Weak),
            Rule::new([[A, K, A], [B, O, K], [A, B, A]], Weak),
            Rule::new([[A, B, A], [A, NT, A], [A, K, A]], Weak),
            // Blood regrowth where weakness clusters.
            Rule::new([[K, A, A], [K, NT, A], [K, A, A]], Blood),
            Rule::new([[A, K, A], [A, K, A], [A, K, A]], Blood),
            Rule::new([[A, A, A], [A, NT, A], [K, F, A]], Blood),
            // Oxygen recovery inside weakened regions.
            Rule::new([[A, K, A], [K, K, A], [A, A, A]], Oxygen),
            Rule::new([[A, K, K], [T, NT, K], [A, A, A]], Oxygen),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_table_size() {
        assert_eq!(22, RuleTable::reactions().len());
    }

    #[test]
    fn test_rule_matches_neighborhood() {
        // Center Substance with solvent on its right, cavity elsewhere.
        let mut grid = Grid::filled(3, Cell::Cavity);
        grid.set(1, 1, Cell::Substance);
        grid.set(2, 1, Cell::Solvent);

        let hit = Rule::new(
            [
                [Pattern::Any, Pattern::Any, Pattern::Any],
                [Pattern::Any, Pattern::Is(Cell::Substance), Pattern::Is(Cell::Solvent)],
                [Pattern::Any, Pattern::Any, Pattern::Any],
            ],
            Cell::Toxic,
        );
        assert!(hit.matches(&grid, 1, 1));

        let miss = Rule::new(
            [
                [Pattern::Any, Pattern::Any, Pattern::Any],
                [Pattern::Any, Pattern::Is(Cell::Blood), Pattern::Is(Cell::Solvent)],
                [Pattern::Any, Pattern::Any, Pattern::Any],
            ],
            Cell::Toxic,
        );
        assert!(!miss.matches(&grid, 1, 1));
    }

    /// Two rules match the same neighborhood; the earlier one wins.
    #[test]
    fn test_first_match_wins() {
        let grid = Grid::filled(3, Cell::Cavity);
        let all_any = [[Pattern::Any; 3]; 3];
        let table = RuleTable::new(vec![
            Rule::new(all_any, Cell::Blood),
            Rule::new(all_any, Cell::Weak),
        ]);
        assert_eq!(Some(Cell::Blood), table.find_match(&grid, 1, 1));
    }
}
