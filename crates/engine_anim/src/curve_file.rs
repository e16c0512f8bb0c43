//! Curve control-point files.
//!
//! The format is plain text with one whitespace-separated `x y` pair per
//! line. A line holding only `-` starts a new point list, which lets one
//! file carry several levels of detail of the same curve:
//!
//! ```text
//! 0.0 1.0
//! 0.5 1.2
//! 1.0 0.8
//! -
//! 0.0 1.0
//! 1.0 0.8
//! ```
//!
//! Blank lines are ignored, as are empty lists produced by consecutive
//! separators.

use std::path::Path;

use engine_math::DVec2;
use tracing::debug;

use crate::error::AnimError;

/// Parse curve file contents into one or more point lists.
///
/// # Errors
///
/// Returns [`AnimError::MalformedPoint`] for a line that is not two numbers,
/// and [`AnimError::EmptyCurve`] if the text holds no points.
pub fn parse_curve_points(text: &str) -> Result<Vec<Vec<DVec2>>, AnimError> {
    let mut lists: Vec<Vec<DVec2>> = Vec::new();
    let mut current: Vec<DVec2> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "-" {
            if !current.is_empty() {
                lists.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(parse_point(line).ok_or_else(|| AnimError::MalformedPoint {
            line: index + 1,
            content: line.to_string(),
        })?);
    }
    if !current.is_empty() {
        lists.push(current);
    }

    if lists.is_empty() {
        return Err(AnimError::EmptyCurve);
    }
    Ok(lists)
}

/// Read and parse a curve file.
///
/// # Errors
///
/// Returns [`AnimError::Io`] if the file cannot be read, otherwise any error
/// from [`parse_curve_points`].
pub fn load_curve_file(path: impl AsRef<Path>) -> Result<Vec<Vec<DVec2>>, AnimError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| AnimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lists = parse_curve_points(&text)?;
    debug!(
        path = %path.display(),
        lists = lists.len(),
        points = lists.iter().map(Vec::len).sum::<usize>(),
        "loaded curve file"
    );
    Ok(lists)
}

fn parse_point(line: &str) -> Option<DVec2> {
    let mut fields = line.split_whitespace();
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(DVec2::new(x, y))
}
