//! Planning engine: input parsing, plan orchestration and benchmarks

pub mod benchmark;
pub mod error;
pub mod input;
pub mod planner;

pub use benchmark::{
    BenchmarkReport, BenchmarkResult, BenchmarkSettings, format_table, generate_items,
    run_benchmark,
};
pub use error::InputError;
pub use input::{PlanRequest, load_request, parse_header, parse_input, parse_item_line};
pub use planner::{PlanResult, Planner, utilization};
