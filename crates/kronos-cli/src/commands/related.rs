//! Related command implementation.

use crate::cli::RelatedArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::input::load_results;
use crate::output::Formatter;
use kronos_domain::{AnalysisRequest, CorrelationResult};
use kronos_graph::CorrelationPipeline;
use kronos_sdk::CorrelationClient;

/// Execute the related command.
pub async fn execute_related(args: RelatedArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let pipeline = CorrelationPipeline::new(args.pipeline_config(&config.pipeline))?;
    let results = fetch_results(&args, config).await?;

    let target_number = args.target.trim();
    let target = find_target(&results, target_number)?;
    let related = pipeline.expand_related(target, &results);

    println!("{}", formatter.format_related(&related)?);
    for line in formatter.format_warnings(related.warnings()) {
        eprintln!("{}", line);
    }

    Ok(())
}

/// Load results from a file or request them from the backend.
async fn fetch_results(args: &RelatedArgs, config: &Config) -> Result<Vec<CorrelationResult>> {
    if let Some(path) = &args.input {
        return load_results(path);
    }

    let (Some(mission), Some(from), Some(to)) = (&args.mission, args.from, args.to) else {
        return Err(CliError::InvalidInput(
            "Provide --input FILE or --mission with --from and --to".to_string(),
        ));
    };

    let backend_url = args.backend_url.as_deref().unwrap_or(&config.backend_url);
    let client = CorrelationClient::new(backend_url);
    tracing::debug!(backend = client.base_url(), mission = %mission, "Requesting correlation analysis");
    let request = AnalysisRequest::new(mission.clone(), from, to, args.min_matches);
    Ok(client.analyze_correlation(&request).await?)
}

/// The target's own record among the results.
fn find_target<'a>(results: &'a [CorrelationResult], number: &str) -> Result<&'a CorrelationResult> {
    results
        .iter()
        .find(|r| r.target_number.trim() == number)
        .ok_or_else(|| CliError::InvalidInput(format!("No correlation record for {}", number)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_target() {
        let results = vec![
            CorrelationResult::new("3005555555", "Claro", 2, vec![], 0.6),
            CorrelationResult::new(" 3001234567 ", "Claro", 4, vec![], 0.9),
        ];
        assert_eq!(find_target(&results, "3001234567").unwrap().occurrences, 4);
        assert!(find_target(&results, "3000000000").is_err());
    }
}
