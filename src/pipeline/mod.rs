pub mod stage1_validate;
pub mod stage2_peak;
pub mod stage3_rank;
pub mod stage4_reorder;
pub mod stage5_report;
