//! Reference geometry drawn alongside the cloud

use spreadcloud_core::{EmbeddingPoint, Error, Result, Rgb};

/// Line-list vertices for a square grid.
///
/// Lines run at every integer step `i` in `-size..=size` (scaled by
/// `scale`) in both directions, split into segments `div * scale` long.
/// Lines whose index is a multiple of `div` take `primary_color`, the rest
/// `secondary_color`. `map_3d` places the 2D grid coordinates in space.
pub fn grid(
    size: i32,
    div: i32,
    scale: f32,
    map_3d: fn(f32, f32) -> [f32; 3],
    primary_color: Rgb,
    secondary_color: Rgb,
) -> Result<Vec<EmbeddingPoint>> {
    if div <= 0 {
        return Err(Error::InvalidData(format!(
            "grid division must be positive, got {}",
            div
        )));
    }

    let subgrid = size / div;
    let length = div as f32 * scale;
    let mut vertices = Vec::new();

    for i in -size..=size {
        let color = if i.abs() % div == 0 {
            primary_color
        } else {
            secondary_color
        };
        let offset = i as f32 * scale;

        for j in -subgrid..subgrid {
            let start = j as f32 * length;
            let end = (j + 1) as f32 * length;
            vertices.push(EmbeddingPoint::new(map_3d(end, offset), color));
            vertices.push(EmbeddingPoint::new(map_3d(start, offset), color));
            vertices.push(EmbeddingPoint::new(map_3d(offset, end), color));
            vertices.push(EmbeddingPoint::new(map_3d(offset, start), color));
        }
    }

    Ok(vertices)
}

/// Floor grid in the XZ plane, 600 units each way with a major line every 12
pub fn default_grid() -> Vec<EmbeddingPoint> {
    grid(50 * 12, 12, 1.0, |x, y| [x, 0.0, y], [0.2; 3], [0.1; 3])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xz(x: f32, y: f32) -> [f32; 3] {
        [x, 0.0, y]
    }

    #[test]
    fn test_grid_vertex_count() {
        let vertices = grid(2, 1, 1.0, xz, [1.0; 3], [0.0; 3]).unwrap();
        // 5 line offsets, 4 segments each, 2 directions, 2 vertices per segment
        assert_eq!(vertices.len(), 5 * 4 * 4);
        assert_eq!(vertices.len() % 2, 0);
    }

    #[test]
    fn test_grid_colors_and_extent() {
        let vertices = grid(4, 2, 0.5, xz, [1.0; 3], [0.0; 3]).unwrap();

        for v in &vertices {
            assert_eq!(v.position.y, 0.0);
            assert!(v.position.x.abs() <= 2.0);
            assert!(v.position.z.abs() <= 2.0);
        }

        // i = -4 is a major line, i = -3 is not
        assert_eq!(vertices[0].color, [1.0; 3]);
        let per_offset = 4 * 2 * 2;
        assert_eq!(vertices[per_offset].color, [0.0; 3]);
    }

    #[test]
    fn test_grid_rejects_zero_division() {
        assert!(matches!(
            grid(10, 0, 1.0, xz, [1.0; 3], [0.0; 3]),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_default_grid_is_flat_line_list() {
        let vertices = default_grid();
        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 2, 0);
        assert!(vertices.iter().all(|v| v.position.y == 0.0));
    }
}
