use crate::archive::{describe_patch, mod_prefix, write_archive_comment, PatchArchive};
use crate::car::car_screen_name;
use crate::config::PatchConfig;
use crate::error::PatchError;
use crate::pipeline::process_car;
use crate::rules::RuleSet;
use crate::steam::{cars_directory, default_steam_roots, find_ac_root};
use crate::util::ensure_unique;
use argh::FromArgs;
use bytesize::ByteSize;
use log::debug;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use transparency_patch_alpha::AlphaPolicy;

/// Rules file used when none is given.
pub const DEFAULT_RULES_FILE: &str = "Rules.txt";

#[derive(FromArgs, Debug)]
/// Makes semi-transparent car skin textures opaque and packs them into a patch archive
pub struct PatchCmd {
    /// car ids to process; if omitted, every car named in the rules
    #[argh(positional)]
    pub cars: Vec<String>,

    /// path to the content/cars directory; if omitted, found through Steam
    #[argh(option, short = 'd')]
    pub directory: Option<PathBuf>,

    /// rules files [default: Rules.txt]
    #[argh(option, short = 'r')]
    pub rules: Vec<PathBuf>,

    /// output archive; if omitted, transparencyPatch_{car}.zip in the current directory
    #[argh(option, short = 'o')]
    pub output: Option<PathBuf>,

    /// pack as a JSGME mod [default: true]
    #[argh(option, short = 'm', long = "mod", default = "true")]
    pub pack_as_mod: bool,

    /// keep gradients by stretching alpha [default: true]
    #[argh(option, default = "true")]
    pub gradients: bool,

    /// threshold for gradients, in (0, 1] [default: 0.4]
    #[argh(option, default = "AlphaPolicy::DEFAULT_THRESHOLD")]
    pub gradient_threshold: f64,

    /// use DXT1 compression for DDS textures by default
    #[argh(switch)]
    pub dxt1: bool,

    /// use production-quality DXT1 compression; might be worse
    #[argh(switch)]
    pub dxt1_production_quality: bool,

    /// generate mipmaps for DDS textures [default: true]
    #[argh(option, default = "true")]
    pub mipmaps: bool,

    /// print debug diagnostics
    #[argh(switch, short = 'v')]
    pub verbose: bool,
}

impl PatchCmd {
    fn config(&self) -> Result<PatchConfig, PatchError> {
        PatchConfig::builder()
            .preserve_gradients(self.gradients)
            .gradient_threshold(self.gradient_threshold)
            .dxt1(self.dxt1)
            .production_quality(self.dxt1_production_quality)
            .mipmaps(self.mipmaps)
            .pack_as_mod(self.pack_as_mod)
            .build()
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSummary {
    pub output: PathBuf,
    pub cars: usize,
    pub skins: usize,
    /// Textures written to the archive.
    pub fixed: usize,
    /// Textures that needed no change.
    pub skipped: usize,
    pub elapsed: Duration,
}

impl PatchSummary {
    pub fn print(&self) {
        let size = fs::metadata(&self.output).map(|m| m.len()).unwrap_or(0);
        println!("\n=== Patch Complete ===");
        println!("Output: {}", self.output.display());
        println!("Cars: {}, skins: {}", self.cars, self.skins);
        println!("Textures patched: {}, skipped: {}", self.fixed, self.skipped);
        println!("Archive size: {}", ByteSize(size));
        println!("Time taken: {:.2?}", self.elapsed);
    }
}

fn default_output_name(car_ids: &[String]) -> String {
    match car_ids {
        [single] => format!("transparencyPatch_{single}.zip"),
        _ => format!("transparencyPatch_{}.zip", car_ids.len()),
    }
}

fn resolve_cars_directory(directory: Option<PathBuf>) -> Result<PathBuf, PatchError> {
    match directory {
        Some(directory) => Ok(directory),
        None => find_ac_root(&default_steam_roots())
            .map(|root| cars_directory(&root))
            .ok_or(PatchError::AcRootNotFound),
    }
}

pub fn handle_patch_command(cmd: PatchCmd) -> Result<PatchSummary, PatchError> {
    let start = Instant::now();
    let config = cmd.config()?;

    let rules_files = if cmd.rules.is_empty() {
        vec![PathBuf::from(DEFAULT_RULES_FILE)]
    } else {
        cmd.rules.clone()
    };
    let listed: Vec<String> = rules_files
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    println!("Rules:\n  {}", listed.join("\n  "));

    let rules = RuleSet::load(&rules_files)?;
    if rules.is_empty() {
        return Err(PatchError::NoRules);
    }

    let cars_dir = resolve_cars_directory(cmd.directory)?;
    debug!("Cars directory: {}", cars_dir.display());

    let requested: Vec<String> = if cmd.cars.is_empty() {
        rules.car_ids().map(str::to_owned).collect()
    } else {
        cmd.cars
    };
    let car_ids: Vec<String> = requested
        .into_iter()
        .filter(|id| cars_dir.join(id).is_dir())
        .collect();

    let car_names: Vec<String> = car_ids
        .iter()
        .map(|id| car_screen_name(&cars_dir.join(id), id))
        .collect();
    let description = describe_patch(&car_names);

    let output = ensure_unique(&match cmd.output {
        Some(output) => output,
        None => std::env::current_dir()?.join(default_output_name(&car_ids)),
    });

    let prefix = if config.pack_as_mod() {
        mod_prefix(&car_names)
    } else {
        String::new()
    };

    let mut archive = PatchArchive::new(BufWriter::new(File::create(&output)?), prefix);
    if config.pack_as_mod() {
        archive.add_description(&description)?;
    }

    let mut summary = PatchSummary {
        output,
        cars: car_ids.len(),
        skins: 0,
        fixed: 0,
        skipped: 0,
        elapsed: Duration::ZERO,
    };

    for car_id in &car_ids {
        let Some(car_rules) = rules.rules_for(car_id) else {
            continue;
        };
        match process_car(car_id, &cars_dir, car_rules, &config, &mut archive) {
            Ok(outcome) => {
                summary.skins += outcome.skins;
                summary.fixed += outcome.fixed;
                summary.skipped += outcome.skipped;
            }
            Err(error @ PatchError::Texture { .. }) => eprintln!("    {error}"),
            Err(error) => return Err(error),
        }
    }

    let mut writer = archive.finish()?;
    write_archive_comment(&mut writer, &description)?;
    drop(writer);

    summary.elapsed = start.elapsed();
    Ok(summary)
}
