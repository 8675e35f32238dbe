use std::path::PathBuf;

/// Steps simulated per invocation unless told otherwise.
pub const DEFAULT_STEPS: u64 = 200;

/// Where a simulation lives on disk and how far each run advances it.
///
/// Every file the run touches is derived from `base_dir`:
///
/// | file          | purpose                                   |
/// |---------------|-------------------------------------------|
/// | `state.json`  | canonical state document                  |
/// | `grid/`       | one `cell_{x}_{y}.txt` per black cell     |
/// | `ant-log.md`  | append-only snapshot log                  |
/// | `summary.txt` | latest summary sentence                   |
/// | `README.md`   | status block patched between markers      |
///
/// A dry run simulates the steps in memory and writes none of them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub base_dir: PathBuf,
    pub steps: u64,
    pub dry_run: bool,
}

impl Config {
    pub fn new(base_dir: impl Into<PathBuf>, steps: u64) -> Self {
        Config {
            base_dir: base_dir.into(),
            steps,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn state_path(&self) -> PathBuf {
        self.base_dir.join("state.json")
    }

    pub fn mirror_dir(&self) -> PathBuf {
        self.base_dir.join("grid")
    }

    /// The mirror directory flips are written to, `None` on a dry run.
    pub fn run_mirror_dir(&self) -> Option<PathBuf> {
        (!self.dry_run).then(|| self.mirror_dir())
    }

    pub fn log_path(&self) -> PathBuf {
        self.base_dir.join("ant-log.md")
    }

    pub fn summary_path(&self) -> PathBuf {
        self.base_dir.join("summary.txt")
    }

    pub fn readme_path(&self) -> PathBuf {
        self.base_dir.join("README.md")
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(".", DEFAULT_STEPS)
    }
}
