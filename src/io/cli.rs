//! Command-line interface for batch processing PNG samples

use crate::algorithm::executor::{
    AlgorithmConfig, Model, ModelKind, SolveStatus, WaveCollapse, iteration_limit,
};
use crate::algorithm::selection::Heuristic;
use crate::analysis::patterns::SampleProcessor;
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_ITERATION_LIMIT, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH,
    DEFAULT_SEED, DEFAULT_SYMMETRY, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter, invalid_target};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "wavecollapse")]
#[command(
    author,
    version,
    about = "Generate images that locally resemble a sample using wave function collapse"
)]
/// Command-line arguments for the generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed of the first attempt
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum collapses per attempt (negative for unbounded)
    #[arg(short, long, default_value_t = DEFAULT_ITERATION_LIMIT, allow_negative_numbers = true)]
    pub limit: i64,

    /// Seeds to try before keeping the blended preview
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// How symbols are derived from the sample
    #[arg(short, long, value_enum, default_value_t = ModelKind::Overlapping)]
    pub model: ModelKind,

    /// Pattern edge length (defaults to 3 for overlapping, 1 for adjacency)
    #[arg(short = 'N', long)]
    pub pattern_size: Option<usize>,

    /// Square symmetries applied to observations (1, 2, 4 or 8)
    #[arg(short = 'S', long, default_value_t = DEFAULT_SYMMETRY)]
    pub symmetry: usize,

    /// Treat the sample as wrapping around its edges
    #[arg(long)]
    pub periodic_input: bool,

    /// Make the output wrap around its edges
    #[arg(short, long)]
    pub periodic_output: bool,

    /// Pin the last color of the sample to the bottom row
    #[arg(short, long)]
    pub ground: bool,

    /// Cell selection policy
    #[arg(long, value_enum, default_value_t = Heuristic::Entropy)]
    pub heuristic: Heuristic,

    /// Output width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Solver configuration described by the arguments
    pub fn algorithm_config(&self) -> AlgorithmConfig {
        AlgorithmConfig {
            model: self.model,
            pattern_size: self
                .pattern_size
                .unwrap_or_else(|| self.model.default_pattern_size()),
            symmetry: self.symmetry,
            periodic_input: self.periodic_input,
            periodic_output: self.periodic_output,
            ground: self.ground,
            heuristic: self.heuristic,
            width: self.width,
            height: self.height,
        }
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, sample loading, configuration
    /// validation or image export fails. Contradictions are not errors.
    pub fn process(&mut self) -> Result<()> {
        if self.cli.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.cli.attempts,
                &"at least one attempt is required",
            ));
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if !is_png(&self.cli.target) {
                return Err(invalid_target(&self.cli.target, "not a PNG image"));
            }
            if self.should_process_file(&self.cli.target) {
                Ok(vec![self.cli.target.clone()])
            } else {
                Ok(vec![])
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if is_png(&path) && !is_output(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_target(
                &self.cli.target,
                "neither a PNG file nor a directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if output_path(input_path).exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for user feedback when every attempt failed
    #[allow(clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let attempts = self.cli.attempts;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, attempts);
        }

        let config = self.cli.algorithm_config();
        let processor = SampleProcessor::from_png_file(input_path)?;
        let model = Model::from_processor(processor, &config)?;
        let mut solver = WaveCollapse::new(model, &config)?;
        let limit = iteration_limit(self.cli.limit);

        let mut status = SolveStatus::Contradiction;
        for attempt in 0..attempts {
            let seed = self.cli.seed.wrapping_add(attempt as u64);
            status = solver.run(seed, limit);

            if let Some(ref mut pm) = self.progress_manager {
                pm.update_attempt(index, attempt + 1, &status.to_string());
            }
            if status != SolveStatus::Contradiction {
                break;
            }
        }

        export_grid_as_png(&solver.render(), output_path(input_path))?;

        if !status.is_success() && !self.cli.quiet {
            eprintln!(
                "{}: {status} after {attempts} attempt(s), wrote blended preview",
                input_path.display()
            );
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, status.is_success(), start_time.elapsed());
        }

        Ok(())
    }
}

/// Output path for an input sample: `<stem>_result.<ext>` beside it
pub fn output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = input_path.extension().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        extension.to_string_lossy()
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

// Earlier results in the same directory are not samples
fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
