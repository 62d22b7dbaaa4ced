//! Line-oriented rendering of search results

use log::debug;

use crate::expression::RenderStyle;
use crate::rational::Rational;
use crate::solver::SearchResult;

/// What to print and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub min: i64,
    pub max: i64,
    /// Non-zero switches to one banner per value with formula depths.
    pub max_depth: usize,
    /// Fully parenthesize every formula.
    pub verbose: bool,
}

impl ReportOptions {
    pub fn new(min: i64, max: i64, max_depth: usize) -> Self {
        Self {
            min,
            max,
            max_depth,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// `min > max` disables the bounds.
    pub fn prints_all(&self) -> bool {
        self.min > self.max
    }

    fn banners(&self) -> bool {
        self.max_depth > 0 || self.prints_all()
    }

    fn style(&self) -> RenderStyle {
        if self.verbose {
            RenderStyle::FullParens
        } else {
            RenderStyle::Compact
        }
    }

    fn selects(&self, value: Rational) -> bool {
        if !value.is_integer() {
            return false;
        }
        if self.prints_all() {
            return true;
        }
        let n = value.numer();
        self.min <= n && n <= self.max
    }
}

/// Renders the integer solutions of `result` selected by `options`, values
/// ascending and formulas of one value sorted as text.
pub fn render_report(result: &SearchResult, options: &ReportOptions) -> Vec<String> {
    let style = options.style();
    let mut values: Vec<_> = result
        .solutions
        .iter()
        .filter(|s| options.selects(s.value))
        .collect();
    values.sort_by_key(|s| s.value);

    let mut lines = Vec::new();
    for solution in values {
        let formulas = result.formulas(solution);
        if options.banners() {
            lines.push(format!(
                "--- All formulas for number {} up to depth = {}:",
                solution.value, options.max_depth
            ));
            let mut entries: Vec<String> = formulas
                .iter()
                .map(|f| format!("[{:>2}] {}", f.depth(), f.render(style)))
                .collect();
            entries.sort();
            lines.extend(entries);
        } else {
            let mut entries: Vec<String> =
                formulas.iter().map(|f| f.render(style).to_string()).collect();
            entries.sort();
            lines.extend(
                entries
                    .into_iter()
                    .map(|formula| format!("{}\t= {}", solution.value, formula)),
            );
        }
    }
    debug!("Rendered {} report lines for '{}'", lines.len(), result.digits);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{ExpressionSolver, SolverConfig};

    fn search(digits: &str, max_depth: usize) -> SearchResult {
        let solver = ExpressionSolver::with_config(SolverConfig::with_max_depth(max_depth));
        match solver.search(digits) {
            Ok(result) => result,
            Err(e) => panic!("search for '{}' failed: {}", digits, e),
        }
    }

    #[test]
    fn test_default_mode_lines() {
        let result = search("12", 0);
        let lines = render_report(&result, &ReportOptions::new(3, 3, 0));
        assert_eq!(lines, vec!["3\t= 1 + 2".to_string()]);

        let lines = render_report(&result, &ReportOptions::new(-1, 2, 0));
        assert_eq!(
            lines,
            vec![
                "-1\t= 1 - 2".to_string(),
                "1\t= -(1 - 2)".to_string(),
                "2\t= 1 * 2".to_string(),
            ]
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let result = search("12", 0);
        let lines = render_report(&result, &ReportOptions::new(12, 12, 0));
        assert_eq!(lines, vec!["12\t= 12".to_string()]);
        assert!(render_report(&result, &ReportOptions::new(7, 11, 0)).is_empty());
    }

    #[test]
    fn test_non_integers_are_skipped() {
        let result = search("12", 0);
        assert!(result.solutions.iter().any(|s| !s.value.is_integer()));
        let lines = render_report(&result, &ReportOptions::new(0, 1, 0));
        assert_eq!(lines, vec!["1\t= -(1 - 2)".to_string()]);
    }

    #[test]
    fn test_print_all_mode() {
        let result = search("12", 0);
        let lines = render_report(&result, &ReportOptions::new(1, 0, 0));
        let banners: Vec<_> = lines.iter().filter(|l| l.starts_with("---")).collect();
        let integers = result
            .solutions
            .iter()
            .filter(|s| s.value.is_integer())
            .count();
        assert_eq!(banners.len(), integers);
        assert!(lines.contains(&"--- All formulas for number 3 up to depth = 0:".to_string()));
        assert!(lines.contains(&"[ 1] 1 + 2".to_string()));
    }

    #[test]
    fn test_depth_mode_banner_and_sorting() {
        let result = search("222", 3);
        let lines = render_report(&result, &ReportOptions::new(6, 6, 3));
        assert_eq!(
            lines.first(),
            Some(&"--- All formulas for number 6 up to depth = 3:".to_string())
        );
        let entries = &lines[1..];
        assert!(entries.len() > 1);
        assert!(entries.contains(&"[ 2] 2 + 2 + 2".to_string()));
        assert!(entries.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_verbose_mode_parenthesizes() {
        let result = search("123", 0);
        let compact = render_report(&result, &ReportOptions::new(6, 6, 0));
        let verbose = render_report(&result, &ReportOptions::new(6, 6, 0).verbose(true));
        assert_eq!(compact.len(), verbose.len());
        assert_eq!(compact, vec!["6\t= 1 + 2 + 3".to_string()]);
        assert_eq!(verbose, vec!["6\t= (1 + 2) + 3".to_string()]);
    }
}
