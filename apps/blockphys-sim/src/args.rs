//! Command-line options.

use anyhow::{bail, Context, Result};
use blockphys_core::{DeltaTime, Mass, Material};

#[derive(Debug, Clone, PartialEq)]
pub struct SimArgs {
    pub bodies: usize,
    pub ticks: u64,
    pub dt: DeltaTime,
    pub material: Material,
    pub mass: Mass,
    /// Log a summary every this many ticks (0 disables)
    pub report_every: u64,
    pub help: bool,
}

impl Default for SimArgs {
    fn default() -> Self {
        Self {
            bodies: 64,
            ticks: 200,
            dt: DeltaTime::TICK,
            material: Material::Wood,
            mass: Mass::ONE,
            report_every: 20,
            help: false,
        }
    }
}

fn value<'a>(flag: &str, iter: &mut impl Iterator<Item = &'a String>) -> Result<&'a str> {
    iter.next()
        .map(String::as_str)
        .with_context(|| format!("{flag} expects a value"))
}

impl SimArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "-n" | "--bodies" => {
                    parsed.bodies = value(arg, &mut iter)?.parse().context("--bodies")?;
                }
                "-t" | "--ticks" => {
                    parsed.ticks = value(arg, &mut iter)?.parse().context("--ticks")?;
                }
                "--dt" => {
                    let raw: f32 = value(arg, &mut iter)?.parse().context("--dt")?;
                    parsed.dt = DeltaTime::new(raw)?;
                }
                "--material" => parsed.material = value(arg, &mut iter)?.parse()?,
                "--mass" => {
                    let raw: f32 = value(arg, &mut iter)?.parse().context("--mass")?;
                    parsed.mass = Mass::new(raw)?;
                }
                "--report-every" => {
                    parsed.report_every =
                        value(arg, &mut iter)?.parse().context("--report-every")?;
                }
                other => bail!("unknown argument: {other}"),
            }
        }
        Ok(parsed)
    }
}

pub fn print_help() {
    eprintln!(
        "blockphys headless simulation

USAGE:
    cargo run -p blockphys-sim -- [OPTIONS]

OPTIONS:
    -n, --bodies <N>        Number of bodies to drop (default: 64)
    -t, --ticks <N>         Ticks to simulate (default: 200)
    --dt <SECONDS>          Tick length (default: 0.05)
    --material <NAME>       Body material, e.g. wood, ice, rubber (default: wood)
    --mass <KG>             Body mass (default: 1)
    --report-every <N>      Log a summary every N ticks, 0 to disable (default: 20)
    -h, --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        assert_eq!(SimArgs::parse(&[]).unwrap(), SimArgs::default());
    }

    #[test]
    fn parses_all_options() {
        let parsed = SimArgs::parse(&args(&[
            "-n", "8", "--ticks", "50", "--dt", "0.02", "--material", "ice", "--mass", "2.5",
        ]))
        .unwrap();
        assert_eq!(parsed.bodies, 8);
        assert_eq!(parsed.ticks, 50);
        assert!((parsed.dt.get() - 0.02).abs() < f32::EPSILON);
        assert_eq!(parsed.material, Material::Ice);
        assert!((parsed.mass.get() - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(SimArgs::parse(&args(&["--dt", "0"])).is_err());
        assert!(SimArgs::parse(&args(&["--mass", "-3"])).is_err());
        assert!(SimArgs::parse(&args(&["--material", "cheese"])).is_err());
        assert!(SimArgs::parse(&args(&["--ticks"])).is_err());
        assert!(SimArgs::parse(&args(&["--frobnicate"])).is_err());
    }
}
