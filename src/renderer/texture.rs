//! Procedural textures

/// RGBA pixels for a two-color checkerboard
pub struct Checkerboard {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Ground texture: 1024x1024 with 256-pixel dark/light cells
pub fn ground_texture() -> Checkerboard {
    checkerboard(1024, 1024, 256, 256, [26, 23, 15], [245, 232, 163])
}

/// Cell `(i / cell_w + j / cell_h)` even gets `c0`, odd gets `c1`
pub fn checkerboard(
    width: u32,
    height: u32,
    cell_w: u32,
    cell_h: u32,
    c0: [u8; 3],
    c1: [u8; 3],
) -> Checkerboard {
    let cell_w = cell_w.max(1);
    let cell_h = cell_h.max(1);
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for j in 0..height {
        for i in 0..width {
            let [r, g, b] = if (i / cell_w + j / cell_h).is_multiple_of(2) { c0 } else { c1 };
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }
    Checkerboard {
        width,
        height,
        pixels,
    }
}

/// One level of a mip chain, RGBA8
#[derive(Debug, Clone, PartialEq)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Full mip chain down to 1x1, level 0 first.
///
/// Each level halves both sides (never below 1) and averages a 2x2 block of
/// the level above, clamping reads at the edge for odd sizes.
pub fn mip_chain(width: u32, height: u32, rgba: &[u8]) -> Vec<MipLevel> {
    let mut levels = vec![MipLevel {
        width,
        height,
        pixels: rgba.to_vec(),
    }];
    while let Some(prev) = levels.last() {
        if prev.width <= 1 && prev.height <= 1 {
            break;
        }
        let next = downsample(prev);
        levels.push(next);
    }
    levels
}

fn downsample(src: &MipLevel) -> MipLevel {
    let width = (src.width / 2).max(1);
    let height = (src.height / 2).max(1);
    let texel = |x: u32, y: u32, c: usize| -> u32 {
        let x = x.min(src.width - 1);
        let y = y.min(src.height - 1);
        src.pixels[((y * src.width + x) * 4) as usize + c] as u32
    };
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for j in 0..height {
        for i in 0..width {
            let (x, y) = (i * 2, j * 2);
            for c in 0..4 {
                let sum = texel(x, y, c) + texel(x + 1, y, c) + texel(x, y + 1, c) + texel(x + 1, y + 1, c);
                pixels.push(((sum + 2) / 4) as u8);
            }
        }
    }
    MipLevel {
        width,
        height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(board: &Checkerboard, i: u32, j: u32) -> [u8; 4] {
        let at = ((j * board.width + i) * 4) as usize;
        [
            board.pixels[at],
            board.pixels[at + 1],
            board.pixels[at + 2],
            board.pixels[at + 3],
        ]
    }

    #[test]
    fn test_checkerboard_cells() {
        let board = checkerboard(4, 4, 2, 2, [0, 0, 0], [9, 9, 9]);
        assert_eq!(board.pixels.len(), 64);
        assert_eq!(pixel(&board, 0, 0), [0, 0, 0, 255]);
        assert_eq!(pixel(&board, 1, 1), [0, 0, 0, 255]);
        assert_eq!(pixel(&board, 2, 0), [9, 9, 9, 255]);
        assert_eq!(pixel(&board, 0, 3), [9, 9, 9, 255]);
        assert_eq!(pixel(&board, 3, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn test_ground_texture_size() {
        let board = ground_texture();
        assert_eq!((board.width, board.height), (1024, 1024));
        assert_eq!(pixel(&board, 300, 0), [245, 232, 163, 255]);
    }

    #[test]
    fn test_mip_chain_halves_to_one() {
        let board = checkerboard(4, 4, 1, 1, [0, 0, 0], [200, 100, 40]);
        let chain = mip_chain(board.width, board.height, &board.pixels);
        let sizes: Vec<(u32, u32)> = chain.iter().map(|m| (m.width, m.height)).collect();
        assert_eq!(sizes, vec![(4, 4), (2, 2), (1, 1)]);
        assert_eq!(chain[0].pixels, board.pixels);
        // A 1-pixel checker averages to the midpoint of its two colors
        assert_eq!(chain[1].pixels[..4], [100, 50, 20, 255]);
    }

    #[test]
    fn test_mip_chain_non_square() {
        let board = checkerboard(8, 2, 8, 8, [7, 7, 7], [0, 0, 0]);
        let chain = mip_chain(board.width, board.height, &board.pixels);
        let sizes: Vec<(u32, u32)> = chain.iter().map(|m| (m.width, m.height)).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
        for level in &chain {
            assert_eq!(level.pixels.len(), (level.width * level.height * 4) as usize);
            assert!(level.pixels.chunks(4).all(|p| p == [7, 7, 7, 255]));
        }
    }
}
