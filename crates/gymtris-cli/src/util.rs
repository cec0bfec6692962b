use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use gymtris_engine::{EnvConfig, EnvSeed, RewardConfig};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self)
            .with_context(|| format!("Failed to terminate JSON in {}", self.display_path()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads a JSON document from `path`, or from stdin when no path is given.
pub fn read_json_input<T>(file_kind: &str, path: Option<&Path>) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    match path {
        Some(path) => read_json_file(file_kind, path),
        None => serde_json::from_reader(io::stdin().lock())
            .with_context(|| format!("Failed to parse {file_kind} JSON from stdin")),
    }
}

/// Builds the engine configuration, overriding rewards from a JSON file if given.
///
/// Fields missing from the file keep their default values.
pub fn load_env_config(reward_config_path: Option<&Path>) -> anyhow::Result<EnvConfig> {
    let Some(path) = reward_config_path else {
        return Ok(EnvConfig::default());
    };
    let reward: RewardConfig = read_json_file("reward config", path)?;
    Ok(EnvConfig::with_reward(reward))
}

/// Uses the given seed, or draws one and reports it so the run can be replayed.
pub fn seed_or_random(seed: Option<EnvSeed>) -> EnvSeed {
    seed.unwrap_or_else(|| {
        let seed = rand::random();
        eprintln!("Using seed {seed}");
        seed
    })
}

/// Derives the seed of a randomized policy from the engine seed.
#[expect(clippy::cast_possible_truncation)]
pub fn policy_seed(seed: EnvSeed) -> u64 {
    let value = u128::from(seed);
    (value ^ (value >> 64)) as u64
}
