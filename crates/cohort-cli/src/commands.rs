use std::time::Duration;

use anyhow::Result;
use comfy_table::Table;

use cohort_cli::pipeline::run_pass;
use cohort_cli::summary::apply_table_style;
use cohort_cli::types::{PassResult, PipelineConfig};
use cohort_cli::watch;
use cohort_model::{Category, PayloadSlot};
use cohort_validate::{ProcessConfig, ServiceConfig, ValidatorConfig};

use crate::cli::{IntakeArgs, RunArgs, ValidatorArg, WatchArgs};

pub fn run_intake(args: &RunArgs) -> Result<PassResult> {
    let config = pipeline_config(&args.intake);
    run_pass(&config, 1)
}

pub fn run_watch(args: &WatchArgs) -> Result<()> {
    let config = pipeline_config(&args.intake);
    watch::watch(&config, Duration::from_secs(args.interval_secs))
}

pub fn run_categories() {
    let mut categories = Table::new();
    categories.set_header(vec!["Category", "File name contract"]);
    apply_table_style(&mut categories);
    for category in Category::REQUIRED {
        categories.add_row(vec![
            category.token().to_string(),
            format!("{}_<suffix>[-testcase<N>].csv", category.token()),
        ]);
    }
    println!("{categories}");

    let mut slots = Table::new();
    slots.set_header(vec!["Payload slot", "File name prefix", "Multipart part"]);
    apply_table_style(&mut slots);
    for slot in PayloadSlot::ORDER {
        slots.add_row(vec![
            slot.to_string(),
            format!("{}*", slot.file_prefix()),
            slot.part_name().to_string(),
        ]);
    }
    println!();
    println!("{slots}");
}

fn pipeline_config(args: &IntakeArgs) -> PipelineConfig {
    let timeout = Duration::from_secs(args.timeout_secs);
    let validator = match args.validator {
        ValidatorArg::Process => ValidatorConfig::Process(ProcessConfig {
            executable: args.python.clone(),
            script: args.script.clone(),
            schema: args.schema.clone(),
            timeout,
        }),
        ValidatorArg::Service => ValidatorConfig::Service(ServiceConfig {
            base_url: args.base_url.clone(),
            endpoint: args.endpoint.clone(),
            timeout,
        }),
    };
    PipelineConfig {
        inbound_root: args.inbound.clone(),
        ingress_root: args.ingress.clone(),
        validator,
        workers: args.workers,
    }
}
