use phoebe_legacy::epoch::jd_to_datetime;
use phoebe_legacy::params::{OrbitField, ParsedSystem, Scalar, StarParameters};
use phoebe_legacy::units::Conversion;
use phoebe_legacy::{Assembled, ParseDetails, ParseResultVerbose, Star};
use std::path::Path;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(path: &Path, res: &ParseResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Legacy file: {}", path.display()), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Orbit ━━━", ansi::GRAY));
    print_orbit(&res.records, &palette);

    for star in Star::BOTH {
        println!("\n{}", palette.paint(format!("━━━ {} ━━━", star_title(star)), ansi::GRAY));
        print_star(res.records.star(star), &palette);
    }

    println!("\n{}", palette.paint("━━━ Output ━━━", ansi::GRAY));
    let shape = match &res.output {
        Assembled::Records(_) => "records",
        Assembled::System(_) => "two-body system",
        Assembled::Bundle(_) => "bundle",
    };
    println!("  {} {}", palette.dim("shape:"), palette.paint(shape, ansi::GREEN));

    if !res.details.skipped.is_empty() || !res.details.ignored.is_empty() {
        println!("\n{}", palette.paint("━━━ Diagnostics ━━━", ansi::GRAY));
        print_diagnostics(&res.details, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Scan: {}  │  Assemble: {}  │  Build: {}",
        palette.paint(format!("{:?}", res.details.total), ansi::GREEN),
        palette.paint(format!("{:?}", res.details.scan), ansi::CYAN),
        palette.dim(format!("{:?}", res.details.assemble)),
        palette.dim(format!("{:?}", res.details.build)),
    );
    println!(
        "  {} lines  │  {} routed  │  {} comments",
        res.details.lines, res.details.routed, res.details.comments
    );
    println!();
}

fn star_title(star: Star) -> &'static str {
    match star {
        Star::Primary => "Primary",
        Star::Secondary => "Secondary",
    }
}

fn print_orbit(system: &ParsedSystem, palette: &ansi::Palette) {
    let orbit = &system.orbit;
    for field in OrbitField::ALL {
        let scalar = orbit.scalar(field);
        let mut line = fmt_scalar(scalar, field.unit(), palette);
        let conversion = field.legacy_conversion();
        if conversion != Conversion::Identity {
            let legacy = conversion.to_legacy(scalar.value);
            line.push_str(&palette.dim(format!("  (legacy {legacy} {})", conversion.legacy_unit())));
        }
        println!("  {:<8} {line}", palette.paint(field.name(), ansi::BLUE));
    }

    let date = jd_to_datetime(orbit.t0.value)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "n/a".to_string());
    println!("  {:<8} {} {}", palette.dim("epoch"), palette.paint(orbit.t0type.name(), ansi::YELLOW), palette.dim(date));
}

fn print_star(params: &StarParameters, palette: &ansi::Palette) {
    let c = &params.component;
    println!(
        "  {}  atm {}  ld {} {}  irradiator {}",
        palette.bold(&c.label),
        palette.paint(c.atm.name(), ansi::YELLOW),
        palette.paint(c.ld_func.name(), ansi::YELLOW),
        palette.dim(format!("{:?}", c.ld_coeffs)),
        c.irradiator,
    );
    for (name, scalar) in [("teff", &c.teff), ("pot", &c.pot), ("alb", &c.alb), ("gravb", &c.gravb)] {
        println!("    {:<6} {}", palette.paint(name, ansi::BLUE), fmt_scalar(scalar, "", palette));
    }

    for (idx, dep) in params.lc_deps.iter().enumerate() {
        println!(
            "    {} {} {}  l3 {}  pblum {}",
            palette.paint(format!("[lc {idx}]"), ansi::GRAY),
            palette.bold(palette.paint(&dep.reference, ansi::GREEN)),
            palette.paint(&dep.passband, ansi::CYAN),
            dep.l3,
            dep.pblum,
        );
    }
    for dep in &params.rv_deps {
        let points = params
            .observations
            .iter()
            .find(|obs| obs.reference == dep.reference)
            .map(|obs| format!("{} points", obs.len()))
            .unwrap_or_else(|| "no data".to_string());
        println!(
            "    {} {} {}",
            palette.paint("[rv]", ansi::GRAY),
            palette.bold(palette.paint(&dep.reference, ansi::GREEN)),
            palette.dim(format!("{}  {points}", dep.passband)),
        );
    }
}

fn print_diagnostics(details: &ParseDetails, palette: &ansi::Palette) {
    for skipped in &details.skipped {
        println!(
            "  {} {} {}",
            palette.paint(format!("line {}", skipped.line), ansi::YELLOW),
            palette.paint(format!("skipped ({})", skipped.reason), ansi::YELLOW),
            palette.dim(&skipped.text),
        );
    }
    if !details.ignored.is_empty() {
        println!("  {}", palette.dim(format!("{} keys ignored (run with -v for details)", details.ignored.len())));
    }
}

fn fmt_scalar(scalar: &Scalar, unit: &str, palette: &ansi::Palette) -> String {
    let mut out = palette.paint(format!("{} {unit}", scalar.value).trim_end(), ansi::GREEN);
    if let (Some(lo), Some(hi)) = scalar.limits() {
        out.push_str(&palette.dim(format!("  [{lo}, {hi}]")));
    }
    if let Some(step) = scalar.step {
        out.push_str(&palette.dim(format!("  step {step}")));
    }
    if scalar.adjust {
        out.push_str(&palette.paint("  adj", ansi::CYAN));
    }
    out
}
