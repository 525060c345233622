use clap::ValueEnum;

/// How peak-category blocks are arranged along the sample axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryOrder {
    #[default]
    Alphabetical,
    /// Larger blocks first, equal sizes alphabetical.
    GroupSize,
    Custom(Vec<String>),
}

impl CategoryOrder {
    pub fn name(&self) -> &'static str {
        match self {
            CategoryOrder::Alphabetical => "alphabetical",
            CategoryOrder::GroupSize => "group-size",
            CategoryOrder::Custom(_) => "custom",
        }
    }
}

/// Order of samples inside a block, by peak value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Direction::Ascending => "ascending",
            Direction::Descending => "descending",
        }
    }

    pub fn sign(self) -> i64 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReorderParams {
    pub category_order: CategoryOrder,
    pub direction: Direction,
    /// Every sample must carry every category seen in the table.
    pub strict: bool,
    pub expected_total: Option<f64>,
    pub total_tolerance: f64,
}

impl ReorderParams {
    pub fn default_v1() -> Self {
        Self {
            category_order: CategoryOrder::Alphabetical,
            direction: Direction::Ascending,
            strict: true,
            expected_total: None,
            total_tolerance: 0.5,
        }
    }
}

impl Default for ReorderParams {
    fn default() -> Self {
        Self::default_v1()
    }
}
