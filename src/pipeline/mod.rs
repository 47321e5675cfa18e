pub mod stage2_normalize;
pub mod stage3_classify;
pub mod stage4_aggregate;
pub mod stage5_report;
