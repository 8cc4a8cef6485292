use std::env;
use std::path::PathBuf;

use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use facets_core::config::{expand_path, resolve_with_base, Config, FacetsConfig};
use facets_core::hierarchy::{FlatHierarchy, TreeHierarchy};
use facets_core::traits::HierarchyPolicy;
use facets_core::{Facet, FacetResult, RequestContext};
use facets_url::{FacetServices, FacetsSummary, UrlProcessor};

const USAGE: &str = "Usage: facets [--config <dir>] <decode|links|summary> [args...]\n\
    \x20 decode <facet_id> <uri>\n\
    \x20 links <facet_id> <results.json> <uri>\n\
    \x20 summary <facet_source_id> <uri> [--reset]";

fn parse_args() -> (Option<PathBuf>, String, Vec<String>) {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut config_dir = None;
    if args.first().map(String::as_str) == Some("--config") && args.len() > 1 {
        config_dir = Some(expand_path(&args[1]));
        args.drain(..2);
    }
    if args.is_empty() { eprintln!("{}", USAGE); std::process::exit(1); }
    let cmd = args.remove(0);
    (config_dir, cmd, args)
}

fn arg<'a>(args: &'a [String], index: usize) -> &'a str {
    args.get(index).map(String::as_str).unwrap_or_else(|| {
        eprintln!("{}", USAGE);
        std::process::exit(1)
    })
}

fn find_facet<'a>(config: &'a FacetsConfig, facet_id: &str) -> anyhow::Result<&'a Facet> {
    config.facet(facet_id).ok_or_else(|| anyhow::anyhow!("Unknown facet '{}'", facet_id))
}

fn result_json(result: &FacetResult) -> Value {
    json!({
        "value": result.raw_value,
        "display": result.display_value,
        "count": result.count,
        "active": result.active,
        "href": result.href(),
        "children": result.children.iter().map(result_json).collect::<Vec<_>>(),
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let (config_dir, cmd, args) = parse_args();
    let config = match &config_dir {
        Some(dir) => Config::load_from(dir),
        None => Config::load(),
    }
    .map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let facets = config.facets()?;
    let services = FacetServices::from_config(&facets);
    tracing::info!(facets = facets.facets.len(), sources = facets.facet_sources.len(), "configuration loaded");

    match cmd.as_str() {
        "decode" => {
            let facet = find_facet(&facets, arg(&args, 0))?;
            let processor = UrlProcessor::new(facets.url_processor, &services, facet, RequestContext::from_uri(arg(&args, 1)))?;
            println!("{}", serde_json::to_string_pretty(processor.active_filters())?);
        }
        "links" => {
            let facet = find_facet(&facets, arg(&args, 0))?;
            let base = config_dir.clone().unwrap_or_else(|| PathBuf::from("."));
            let results_path = resolve_with_base(&base, arg(&args, 1));
            let mut results: Vec<FacetResult> = serde_json::from_str(&std::fs::read_to_string(&results_path)?)?;
            let mut processor = UrlProcessor::new(facets.url_processor, &services, facet, RequestContext::from_uri(arg(&args, 2)))?;
            processor.mark_active(&mut results);
            let tree = TreeHierarchy::from_results(&results);
            let hierarchy: &dyn HierarchyPolicy = if facet.use_hierarchy { &tree } else { &FlatHierarchy };
            let results = processor.build_urls(hierarchy, results)?;
            let out: Vec<Value> = results.iter().map(result_json).collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        "summary" => {
            let source_id = arg(&args, 0);
            let listed = services.store().facets_for_source(source_id)?;
            let request = RequestContext::from_uri(arg(&args, 1));
            let show_reset = args.iter().any(|a| a == "--reset");
            let summary = FacetsSummary::build(&services, &listed, &request, show_reset)?;
            let items: Vec<Value> = summary
                .items
                .iter()
                .map(|i| json!({ "facet": i.facet_id, "label": i.label, "value": i.raw_value, "href": i.url.to_string() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "items": items, "reset": summary.reset_url.map(|u| u.to_string()) }))?);
        }
        _ => { eprintln!("Unknown command: {}", cmd); std::process::exit(1); }
    }
    Ok(())
}
