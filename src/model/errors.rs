use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("sample {sample}: duplicate category {category}")]
    DuplicateCategory { sample: String, category: String },
    #[error("sample {sample}: missing category {category}")]
    MissingCategory { sample: String, category: String },
    #[error("line {line}: sample {sample}, category {category}: non-numeric value {raw:?}")]
    NonNumericValue {
        line: usize,
        sample: String,
        category: String,
        raw: String,
    },
    #[error("sample {sample}, category {category}: non-finite value")]
    NonFiniteValue { sample: String, category: String },
    #[error("sample {sample}, category {category}: negative value {value}")]
    NegativeValue {
        sample: String,
        category: String,
        value: f64,
    },
    #[error("empty {field} name ({context})")]
    EmptyField {
        field: &'static str,
        context: String,
    },
    #[error("category {category} is not listed in the custom category order")]
    CategoryNotInOrder { category: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReorderError {
    #[error("no observations supplied")]
    EmptyInput,
    #[error("sample {sample} has no observations")]
    InconsistentSample { sample: String },
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}
