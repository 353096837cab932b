// SPDX-License-Identifier: Apache-2.0

//! Casts text values to a typed column and prints each value with its status.
//!
//! ```text
//! castdemo --to decimal --precision 5 --scale 2 --round 123.456 " 7 " abc
//! ```
//!
//! With no values on the command line, one value per stdin line is read.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use castparse::{
    parse_bool, parse_decimal_with_shape, parse_float, parse_int, parse_int_radix, DecimalShape,
    ParseStatus, Parsed,
};
use clap::{Parser, ValueEnum};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
    Decimal,
}

#[derive(Debug, Parser)]
#[command(name = "castdemo", about = "Cast text values to a typed column")]
struct Args {
    /// Target type of the column
    #[arg(long, value_enum, default_value = "i64")]
    to: Target,

    /// Radix for integer targets
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(2..=36))]
    base: u32,

    /// Decimal precision
    #[arg(long, default_value_t = 38)]
    precision: u8,

    /// Decimal scale
    #[arg(long, default_value_t = 0)]
    scale: u8,

    /// Round excess fractional digits half-up instead of truncating
    #[arg(long)]
    round: bool,

    /// Exit with an error if any value does not parse with full success
    #[arg(long)]
    strict: bool,

    /// Values to cast; read from stdin when omitted
    values: Vec<String>,
}

fn status_name(status: ParseStatus) -> &'static str {
    match status {
        ParseStatus::Success => "ok",
        ParseStatus::Failure => "failure",
        ParseStatus::Overflow => "overflow",
        ParseStatus::Underflow => "underflow",
    }
}

fn int_cell<T: castparse::ParseInt + std::fmt::Display>(s: &[u8], base: u32) -> (String, ParseStatus) {
    let parsed: Parsed<T> = if base == 10 {
        parse_int(s)
    } else {
        parse_int_radix(s, base)
    };
    (parsed.value.to_string(), parsed.status)
}

fn float_cell<T: castparse::ParseFloat + std::fmt::Display>(s: &[u8]) -> (String, ParseStatus) {
    let parsed: Parsed<T> = parse_float(s);
    (parsed.value.to_string(), parsed.status)
}

/// `shape` is only read for decimal targets.
fn cast(args: &Args, shape: DecimalShape, s: &[u8]) -> (String, ParseStatus) {
    match args.to {
        Target::I8 => int_cell::<i8>(s, args.base),
        Target::I16 => int_cell::<i16>(s, args.base),
        Target::I32 => int_cell::<i32>(s, args.base),
        Target::I64 => int_cell::<i64>(s, args.base),
        Target::F32 => float_cell::<f32>(s),
        Target::F64 => float_cell::<f64>(s),
        Target::Bool => {
            let parsed = parse_bool(s);
            (parsed.value.to_string(), parsed.status)
        }
        Target::Decimal => {
            let parsed = parse_decimal_with_shape::<i128>(s, shape, args.round);
            (parsed.value.display(shape.scale()).to_string(), parsed.status)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let shape = match args.to {
        Target::Decimal => match DecimalShape::new::<i128>(args.precision, args.scale) {
            Ok(shape) => shape,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(2);
            }
        },
        _ => DecimalShape::default(),
    };
    info!("casting to {:?} (round {})", args.to, args.round);

    let values: Vec<String> = if args.values.is_empty() {
        match io::stdin().lock().lines().collect::<io::Result<Vec<_>>>() {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("Error: Unable to read stdin: {e}");
                return ExitCode::from(2);
            }
        }
    } else {
        args.values.clone()
    };

    let mut stdout = io::stdout().lock();
    let mut rejected = 0usize;
    for value in &values {
        let (rendered, status) = cast(&args, shape, value.as_bytes());
        debug!("{value:?} -> {rendered} ({status:?})");
        if status != ParseStatus::Success {
            rejected += 1;
        }
        if let Err(e) = writeln!(stdout, "{rendered}\t{}", status_name(status)) {
            eprintln!("Error: Unable to write output: {e}");
            return ExitCode::from(2);
        }
    }

    info!("{} values, {rejected} not fully successful", values.len());
    if args.strict && rejected > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
