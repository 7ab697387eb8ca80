//! Column-aligned text tables of integration results.
//!
//! The table has a header row `time <name_0> <name_1> ...` followed by one
//! row per reported point (see [`Solution::reported_points`]). Values use
//! C-style scientific notation, e.g. `7.85398e-01` at precision 5.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use kutta_core::EquationSystem;
use log::info;
use thiserror::Error;

use crate::transient::rk4::Solution;

/// Errors that can occur when writing a result table.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot create {}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write failed")]
    Io(#[from] io::Error),
}

/// Writes the result table to `writer`.
///
/// `precision` is the number of digits after the decimal point.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_table<W: Write>(
    mut writer: W,
    system: &EquationSystem,
    solution: &Solution,
    precision: usize,
) -> Result<(), Error> {
    let names: Vec<&str> = std::iter::once("time").chain(system.names()).collect();

    // sign, leading digit, point, digits, `e`, exponent sign, two exponent digits
    let value_width = precision + 7;
    let width = names
        .iter()
        .map(|name| name.len())
        .max()
        .unwrap_or(0)
        .max(value_width);

    write_row(&mut writer, names.iter().copied(), width)?;

    for j in 0..solution.reported_points() {
        let time = solution.times.get(j).copied().unwrap_or(f64::NAN);
        let values = (0..system.len())
            .map(|i| solution.trajectory.value(i, j).unwrap_or(f64::NAN));
        let cells: Vec<String> = std::iter::once(time)
            .chain(values)
            .map(|value| scientific(value, precision))
            .collect();
        write_row(&mut writer, cells.iter().map(String::as_str), width)?;
    }

    writer.flush()?;
    Ok(())
}

/// Creates `path` and writes the result table to it.
///
/// # Errors
///
/// Returns [`Error::Create`] if the file cannot be created, or
/// [`Error::Io`] if writing fails.
pub fn write_file(
    path: impl AsRef<Path>,
    system: &EquationSystem,
    solution: &Solution,
    precision: usize,
) -> Result<(), Error> {
    let path = path.as_ref();
    info!("writing {} rows to {}", solution.reported_points(), path.display());

    let file = File::create(path).map_err(|source| Error::Create {
        path: path.to_path_buf(),
        source,
    })?;

    write_table(BufWriter::new(file), system, solution, precision)
}

fn write_row<'a, W: Write>(
    writer: &mut W,
    cells: impl Iterator<Item = &'a str>,
    width: usize,
) -> io::Result<()> {
    for (k, cell) in cells.enumerate() {
        if k > 0 {
            write!(writer, " ")?;
        }
        write!(writer, "{cell:>width$}")?;
    }
    writeln!(writer)
}

/// Formats `value` like C's `%.{precision}e`, with a signed two-digit exponent.
fn scientific(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use kutta_core::{Equation, Parameters, TimeGrid};

    use crate::transient::rk4::Integrator;

    #[test]
    fn formats_like_c() {
        assert_eq!(scientific(0.0, 5), "0.00000e+00");
        assert_eq!(scientific(std::f64::consts::FRAC_PI_4, 5), "7.85398e-01");
        assert_eq!(scientific(-1234.56, 3), "-1.235e+03");
        assert_eq!(scientific(1e-120, 2), "1.00e-120");
    }

    #[test]
    fn writes_header_and_reported_rows() {
        let system = EquationSystem::new(vec![
            Equation::new("x", |_t: f64, _s: &[f64], _p: &Parameters| 1.0).with_initial_value(0.5),
            Equation::new("velocity", |_t: f64, _s: &[f64], _p: &Parameters| 0.0),
        ])
        .unwrap();
        let grid = TimeGrid::linear(0.0, 1.0, 3).unwrap();
        let solution = Integrator::new(grid)
            .run(&system, &Parameters::new())
            .unwrap();

        let mut buffer = Vec::new();
        write_table(&mut buffer, &system, &solution, 3).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "      time          x   velocity");
        assert_eq!(lines[1], " 0.000e+00  5.000e-01  0.000e+00");
        assert_eq!(lines[2], " 5.000e-01  1.000e+00  0.000e+00");
    }

    #[test]
    fn missing_times_are_written_as_nan() {
        let system = EquationSystem::new(vec![
            Equation::new("x", |_t: f64, _s: &[f64], _p: &Parameters| 1.0).with_initial_value(0.5),
        ])
        .unwrap();
        let mut solution = Integrator::new(TimeGrid::linear(0.0, 1.0, 3).unwrap())
            .run(&system, &Parameters::new())
            .unwrap();
        solution.times.truncate(1);

        let mut buffer = Vec::new();
        write_table(&mut buffer, &system, &solution, 3).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], " 0.000e+00  5.000e-01");
        assert_eq!(lines[2], "       NaN  1.000e+00");
    }

    #[test]
    fn reports_file_creation_failure() {
        let system = EquationSystem::new(vec![Equation::new(
            "x",
            |_t: f64, _s: &[f64], _p: &Parameters| 0.0,
        )])
        .unwrap();
        let solution = Integrator::new(TimeGrid::linear(0.0, 1.0, 2).unwrap())
            .run(&system, &Parameters::new())
            .unwrap();

        let path = std::env::temp_dir()
            .join("kutta-missing-dir")
            .join("nested")
            .join("res.dat");
        let result = write_file(&path, &system, &solution, 5);

        assert!(matches!(result, Err(Error::Create { .. })));
    }
}
