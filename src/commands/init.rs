use std::fs;

use crate::cli::InitArgs;
use crate::config::{
    DEFAULT_MAX_DUPLICATE_RATIO, DEFAULT_MAX_NON_PRIMARY_LANGUAGE, DEFAULT_MAX_TOKENS,
    DEFAULT_MIN_TOKENS, DEFAULT_MINHASH_SIMILARITY_THRESHOLD,
};
use crate::output::print_error;
use crate::{CorpusGuardError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

#[must_use]
pub fn run_init(args: &InitArgs, quiet: bool) -> i32 {
    match run_init_impl(args, quiet) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Writes a threshold override template.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs, quiet: bool) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(CorpusGuardError::Config(format!(
            "Threshold file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_thresholds_template())?;

    if !quiet {
        println!("Created threshold file: {}", output_path.display());
    }
    Ok(())
}

#[must_use]
pub fn generate_thresholds_template() -> String {
    format!(
        r#"# corpus-guard threshold overrides
#
# Precedence, lowest to highest: built-in defaults, [defaults],
# [categories.<name>], then command-line flags.

[defaults]
# Maximum fraction of records involved in exact or near duplicates
max_duplicate_ratio = {DEFAULT_MAX_DUPLICATE_RATIO}

# Maximum probability mass assigned to languages other than English
max_non_primary_language = {DEFAULT_MAX_NON_PRIMARY_LANGUAGE}

# Records outside [min_tokens, max_tokens] are flagged
min_tokens = {DEFAULT_MIN_TOKENS}
max_tokens = {DEFAULT_MAX_TOKENS}

# Minimum estimated Jaccard similarity for a near-duplicate pair
minhash_similarity_threshold = {DEFAULT_MINHASH_SIMILARITY_THRESHOLD}

# Per-category overrides
# [categories.dispute_resolution]
# max_duplicate_ratio = 0.02

# [categories.content_rights]
# max_tokens = 5000
"#
    )
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
