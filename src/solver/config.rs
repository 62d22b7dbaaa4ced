/// Which formulas the registry keeps for a (value, span) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Only the first formula ever found.
    FirstOnly,
    /// Every distinct formula up to the given depth. The first formula for a
    /// key is kept whatever its depth.
    DepthBounded(usize),
}

/// Configuration for the search
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// `0` keeps one formula per value; anything else bounds formula depth.
    pub max_depth: usize,
}

impl SolverConfig {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn retention(&self) -> Retention {
        match self.max_depth {
            0 => Retention::FirstOnly,
            depth => Retention::DepthBounded(depth),
        }
    }
}
