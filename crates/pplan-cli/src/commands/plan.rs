use anyhow::Result;
use pplan_config::{Config, OutputFormat};
use pplan_core::DropReason;
use pplan_engine::{PlanResult, Planner, load_request};
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::PlanArgs;

pub fn handle(args: PlanArgs, config: &Config) -> Result<()> {
    let strategy = args.strategy.unwrap_or(config.strategy);
    let threads = args.threads.unwrap_or(config.threads);
    let format = args.format.unwrap_or(config.output.format);
    let timing = args.timing || config.output.timing;

    let request = load_request(args.file.as_deref())?;
    if request.skipped_lines > 0 {
        warn!("Skipped {} malformed item line(s)", request.skipped_lines);
    }

    let planner = Planner::with_kind(strategy, threads);
    info!(
        "Planning {} item(s) with {} ({})",
        request.items.len(),
        planner.strategy_name(),
        request.order
    );
    let result = planner.plan(request);

    match format {
        OutputFormat::Text => {
            print!("{}", result.render());
            if timing {
                print_timing(&result);
            }
            if args.digest {
                println!("Digest: {}", result.digest());
            }
        }
        OutputFormat::Json => {
            let json = plan_json(&result, args.digest)?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    report_unplaced(&result);
    Ok(())
}

/// Serialized plan, with the pack digest added when asked for
fn plan_json(result: &PlanResult, with_digest: bool) -> Result<Value> {
    let mut json = serde_json::to_value(result)?;
    if with_digest && let Some(fields) = json.as_object_mut() {
        fields.insert("digest".to_string(), Value::String(result.digest()));
    }
    Ok(json)
}

fn print_timing(result: &PlanResult) {
    let ms = |d: std::time::Duration| d.as_secs_f64() * 1000.0;

    println!();
    println!("Strategy: {}", result.strategy);
    println!("Sort order: {}", result.order);
    println!("Sorting time: {:.3} ms", ms(result.sorting_time));
    println!("Packing time: {:.3} ms", ms(result.packing_time));
    println!("Total time: {:.3} ms", ms(result.total_time));
    println!("Packs: {}", result.non_empty_packs().count());
    println!("Items: {}", result.total_items);
    println!("Utilization: {:.1}%", result.utilization_percent);
}

fn report_unplaced(result: &PlanResult) {
    if result.unplaced.is_empty() {
        return;
    }

    warn!(
        "{} of {} item(s) were not packed",
        result.unplaced_items(),
        result.total_items
    );
    for reason in DropReason::ALL {
        let quantity = result.unplaced_by(reason);
        if quantity > 0 {
            warn!("  {}: {}", reason, quantity);
        }
    }
}
