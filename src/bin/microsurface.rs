use clap::*;

use microsurface::core::pbrt::*;
use microsurface::materials::*;
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::process;

use log::*;

/// Walks per work item; each item owns one random stream.
const CHUNK_SIZE: usize = 4096;
/// Scattering orders beyond this share the last histogram bin.
const HISTOGRAM_ORDERS: usize = 16;

#[derive(Debug, Parser)]
#[clap(author, about, version)]
struct CommandOptions {
    /// Read material parameters from a JSON file.
    #[arg(long, value_name = "filename")]
    pub config: Option<PathBuf>,

    /// Height distribution (uniform, gaussian).
    #[arg(long, value_name = "name")]
    pub height: Option<HeightDistributionType>,

    /// Slope distribution (beckmann, ggx).
    #[arg(long, value_name = "name")]
    pub slope: Option<SlopeDistributionType>,

    /// Microfacet material (conductor, dielectric, diffuse).
    #[arg(long, value_name = "name")]
    pub material: Option<MaterialKind>,

    /// Roughness along x.
    #[arg(long, value_name = "alpha")]
    pub alpha_u: Option<Float>,

    /// Roughness along y.
    #[arg(long, value_name = "alpha")]
    pub alpha_v: Option<Float>,

    /// Relative index of refraction of the dielectric.
    #[arg(long, value_name = "eta")]
    pub eta: Option<Float>,

    /// Bounce limit of a single random walk.
    #[arg(long, value_name = "num")]
    pub max_order: Option<u32>,

    /// Index of the first random stream.
    #[arg(long, default_value = "0", value_name = "num")]
    pub seed: u64,

    /// Number of Monte Carlo samples.
    #[arg(long, default_value = "100000", value_name = "num")]
    pub samples: usize,

    /// Use specified number of threads.
    #[arg(short = 'j', long = "nthreads", value_name = "num")]
    pub nthreads: Option<usize>,

    /// Print results as JSON.
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Suppress all text output other than results and error messages.
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log messages at or above this level (0 -> INFO,
    /// 1 -> WARNING, 2 -> ERROR, 3-> FATAL).
    #[arg(long, value_name = "num")]
    pub minloglevel: Option<i32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate the BSDF times the outgoing cosine for a pair of directions.
    Eval {
        #[arg(long, value_parser = parse_direction, allow_hyphen_values = true, value_name = "x,y,z")]
        wi: Vector3f,
        #[arg(long, value_parser = parse_direction, allow_hyphen_values = true, value_name = "x,y,z")]
        wo: Vector3f,
        /// Scattering order to evaluate, 0 for all orders.
        #[arg(long, default_value = "0", value_name = "k")]
        order: u32,
    },
    /// Sample outgoing directions and report their statistics.
    Sample {
        #[arg(long, value_parser = parse_direction, allow_hyphen_values = true, value_name = "x,y,z")]
        wi: Vector3f,
    },
    /// Estimate the directional albedo.
    Albedo {
        #[arg(long, value_parser = parse_direction, allow_hyphen_values = true, value_name = "x,y,z")]
        wi: Vector3f,
    },
}

fn parse_direction(s: &str) -> Result<Vector3f, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<Float>())
        .collect::<Result<Vec<Float>, _>>()
        .map_err(|e| format!("{}", e))?;
    if values.len() != 3 {
        return Err(format!("expected 3 components, got {}", values.len()));
    }
    let v = Vector3f::new(values[0], values[1], values[2]);
    if !v.is_finite() || v.length_squared() == 0.0 {
        return Err(String::from("direction must be finite and non-zero"));
    }
    return Ok(v.normalize());
}

fn init_logger(opts: &CommandOptions) {
    if let Some(minloglevel) = opts.minloglevel {
        const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
        let log_level = LOG_LEVELS[(minloglevel + 2).clamp(0, 4) as usize];
        env::set_var("RUST_LOG", log_level);
    } else {
        //default log level : warn
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_owned());
        env::set_var("RUST_LOG", log_level);
    }

    env_logger::Builder::from_default_env()
        .format_target(false)
        .format_module_path(false)
        .init();
}

fn load_params(opts: &CommandOptions) -> Result<MicrosurfaceParams, MicrosurfaceError> {
    let mut params = if let Some(path) = opts.config.as_ref() {
        MicrosurfaceParams::from_json_file(path)?
    } else {
        MicrosurfaceParams::default()
    };
    if let Some(height) = opts.height {
        params.height = height;
    }
    if let Some(slope) = opts.slope {
        params.slope = slope;
    }
    if let Some(material) = opts.material {
        params.material = material;
    }
    if let Some(alpha_u) = opts.alpha_u {
        params.alpha_u = alpha_u;
    }
    if let Some(alpha_v) = opts.alpha_v {
        params.alpha_v = alpha_v;
    }
    if let Some(eta) = opts.eta {
        params.eta = eta;
    }
    if let Some(max_order) = opts.max_order {
        params.max_scattering_order = max_order;
    }
    params.validate()?;
    return Ok(params);
}

/// Runs `f` over fixed-size chunks in parallel, one random stream per chunk.
fn run_chunks<T, F>(opts: &CommandOptions, title: &str, f: F) -> T
where
    T: Default + Send + Merge,
    F: Fn(&mut RNG, usize) -> T + Sync,
{
    let n_chunks = (opts.samples + CHUNK_SIZE - 1) / CHUNK_SIZE;
    let reporter = ProgressReporter::new(opts.samples, title, opts.quiet);
    let result = (0..n_chunks)
        .into_par_iter()
        .map(|chunk| {
            let mut rng = RNG::new_sequence(opts.seed.wrapping_add(chunk as u64));
            let count = usize::min(CHUNK_SIZE, opts.samples - chunk * CHUNK_SIZE);
            let r = f(&mut rng, count);
            reporter.update(count);
            r
        })
        .reduce(T::default, T::merge);
    reporter.done();
    return result;
}

trait Merge {
    fn merge(self, other: Self) -> Self;
}

#[derive(Debug, Default, Clone, Copy)]
struct Moments {
    n: usize,
    sum: f64,
    sum_sq: f64,
}

impl Moments {
    fn add(&mut self, v: Float) {
        let v = v as f64;
        self.n += 1;
        self.sum += v;
        self.sum_sq += v * v;
    }

    fn mean(&self) -> f64 {
        if self.n == 0 {
            return 0.0;
        }
        return self.sum / self.n as f64;
    }

    fn std_error(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        let n = self.n as f64;
        let mean = self.mean();
        let var = f64::max(0.0, self.sum_sq / n - mean * mean);
        return f64::sqrt(var / (n - 1.0));
    }
}

impl Merge for Moments {
    fn merge(self, other: Self) -> Self {
        Moments {
            n: self.n + other.n,
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
        }
    }
}

impl Merge for (Moments, Moments) {
    fn merge(self, other: Self) -> Self {
        (self.0.merge(other.0), self.1.merge(other.1))
    }
}

#[derive(Debug, Default, Clone)]
struct SampleStats {
    n: usize,
    reflected: usize,
    transmitted: usize,
    escaped: usize,
    direction_sum: [f64; 3],
    order_sum: u64,
    histogram: Vec<u64>,
}

impl Merge for SampleStats {
    fn merge(mut self, other: Self) -> Self {
        self.n += other.n;
        self.reflected += other.reflected;
        self.transmitted += other.transmitted;
        self.escaped += other.escaped;
        for i in 0..3 {
            self.direction_sum[i] += other.direction_sum[i];
        }
        self.order_sum += other.order_sum;
        if self.histogram.len() < other.histogram.len() {
            self.histogram.resize(other.histogram.len(), 0);
        }
        for (i, c) in other.histogram.iter().enumerate() {
            self.histogram[i] += c;
        }
        self
    }
}

#[derive(Debug, Serialize)]
struct EvalReport {
    params: MicrosurfaceParams,
    wi: [Float; 3],
    wo: [Float; 3],
    order: u32,
    samples: usize,
    value: f64,
    std_error: f64,
    single_scattering: f64,
}

#[derive(Debug, Serialize)]
struct SampleReport {
    params: MicrosurfaceParams,
    wi: [Float; 3],
    samples: usize,
    reflection: f64,
    transmission: f64,
    mean_direction: [f64; 3],
    mean_order: f64,
    order_histogram: Vec<u64>,
}

#[derive(Debug, Serialize)]
struct AlbedoReport {
    params: MicrosurfaceParams,
    wi: [Float; 3],
    samples: usize,
    albedo: f64,
    std_error: f64,
    escaped: f64,
}

fn print_json<T: Serialize>(report: &T) -> Result<(), MicrosurfaceError> {
    let s = serde_json::to_string_pretty(report)?;
    println!("{}", s);
    return Ok(());
}

fn eval_command(
    opts: &CommandOptions,
    params: &MicrosurfaceParams,
    material: &dyn MicrosurfaceMaterial,
    wi: &Vector3f,
    wo: &Vector3f,
    order: u32,
) -> Result<(), MicrosurfaceError> {
    let scattering_order = ScatteringOrder::from_index(order);
    let (value, single) = run_chunks(opts, "Eval", |rng, count| {
        let mut value = Moments::default();
        let mut single = Moments::default();
        for _ in 0..count {
            value.add(material.eval(wi, wo, scattering_order, rng));
            single.add(material.eval_single_scattering(wi, wo, rng));
        }
        (value, single)
    });

    let report = EvalReport {
        params: params.clone(),
        wi: (*wi).into(),
        wo: (*wo).into(),
        order,
        samples: value.n,
        value: value.mean(),
        std_error: value.std_error(),
        single_scattering: single.mean(),
    };
    if opts.json {
        return print_json(&report);
    }
    println!("eval (order {}): {:.6} +- {:.6}", order, report.value, report.std_error);
    println!("single scattering:  {:.6}", report.single_scattering);
    return Ok(());
}

fn sample_command(
    opts: &CommandOptions,
    params: &MicrosurfaceParams,
    material: &dyn MicrosurfaceMaterial,
    wi: &Vector3f,
) -> Result<(), MicrosurfaceError> {
    let max_order = material.microsurface().max_scattering_order();
    let stats = run_chunks(opts, "Sample", |rng, count| {
        let mut stats = SampleStats {
            histogram: vec![0; HISTOGRAM_ORDERS + 1],
            ..Default::default()
        };
        for _ in 0..count {
            let (wo, order) = material.sample(wi, rng);
            stats.n += 1;
            if order < max_order {
                stats.escaped += 1;
            }
            if wo.z >= 0.0 {
                stats.reflected += 1;
            } else {
                stats.transmitted += 1;
            }
            for i in 0..3 {
                stats.direction_sum[i] += wo[i] as f64;
            }
            stats.order_sum += order as u64;
            stats.histogram[usize::min(order as usize, HISTOGRAM_ORDERS)] += 1;
        }
        stats
    });

    let n = usize::max(1, stats.n) as f64;
    let report = SampleReport {
        params: params.clone(),
        wi: (*wi).into(),
        samples: stats.n,
        reflection: stats.reflected as f64 / n,
        transmission: stats.transmitted as f64 / n,
        mean_direction: [
            stats.direction_sum[0] / n,
            stats.direction_sum[1] / n,
            stats.direction_sum[2] / n,
        ],
        mean_order: stats.order_sum as f64 / n,
        order_histogram: stats.histogram,
    };
    if opts.json {
        return print_json(&report);
    }
    println!("reflection:   {:.6}", report.reflection);
    println!("transmission: {:.6}", report.transmission);
    println!(
        "mean direction: ({:.6}, {:.6}, {:.6})",
        report.mean_direction[0], report.mean_direction[1], report.mean_direction[2]
    );
    println!("mean order:   {:.4}", report.mean_order);
    for (k, c) in report.order_histogram.iter().enumerate() {
        if *c == 0 {
            continue;
        }
        let label = if k == HISTOGRAM_ORDERS {
            format!("{}+", k)
        } else {
            format!("{}", k)
        };
        println!("  order {:>4}: {}", label, c);
    }
    return Ok(());
}

fn albedo_command(
    opts: &CommandOptions,
    params: &MicrosurfaceParams,
    material: &dyn MicrosurfaceMaterial,
    wi: &Vector3f,
) -> Result<(), MicrosurfaceError> {
    let max_order = material.microsurface().max_scattering_order();
    let (albedo, escaped) = run_chunks(opts, "Albedo", |rng, count| {
        let mut albedo = Moments::default();
        let mut escaped = Moments::default();
        for _ in 0..count {
            let u = rng.uniform_2d();
            let (wo, pdf) = if material.is_transmissive() {
                (uniform_sample_sphere(&u), uniform_sphere_pdf())
            } else {
                (uniform_sample_hemisphere(&u), uniform_hemisphere_pdf())
            };
            let v = material.eval(wi, &wo, ScatteringOrder::All, rng) / pdf;
            albedo.add(v);
            let (_, order) = material.sample(wi, rng);
            escaped.add(if order < max_order { 1.0 } else { 0.0 });
        }
        (albedo, escaped)
    });

    let report = AlbedoReport {
        params: params.clone(),
        wi: (*wi).into(),
        samples: albedo.n,
        albedo: albedo.mean(),
        std_error: albedo.std_error(),
        escaped: escaped.mean(),
    };
    if opts.json {
        return print_json(&report);
    }
    println!("albedo:  {:.6} +- {:.6}", report.albedo, report.std_error);
    println!("escaped: {:.6}", report.escaped);
    return Ok(());
}

fn run(opts: &CommandOptions) -> Result<(), MicrosurfaceError> {
    if opts.samples == 0 {
        return Err(MicrosurfaceError::error("Sample count must be positive."));
    }
    if let Some(nthreads) = opts.nthreads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(usize::max(1, nthreads))
            .build_global()
        {
            warn!("{}", e);
        }
    }

    let params = load_params(opts)?;
    let material = create_microsurface_material(&params)?;
    if !opts.quiet && !opts.json {
        let version = env!("CARGO_PKG_VERSION");
        println!(
            "microsurface version {} [{} threads]",
            version,
            rayon::current_num_threads()
        );
        println!(
            "{} / {} heights / {} slopes / alpha = ({}, {})",
            params.material, params.height, params.slope, params.alpha_u, params.alpha_v
        );
        println!();
    }

    match &opts.command {
        Command::Eval { wi, wo, order } => {
            eval_command(opts, &params, material.as_ref(), wi, wo, *order)
        }
        Command::Sample { wi } => sample_command(opts, &params, material.as_ref(), wi),
        Command::Albedo { wi } => albedo_command(opts, &params, material.as_ref(), wi),
    }
}

pub fn main() {
    let opts = CommandOptions::parse();
    init_logger(&opts);
    let ret = match run(&opts) {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            -1
        }
    };
    process::exit(ret);
}
