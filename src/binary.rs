//! Binary maze file format.
//!
//! Layout: 4-byte magic, one format version byte, little-endian `u32`
//! width and height, then one wall byte per cell in row-major order.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::maze::Maze;

const MAGIC: [u8; 4] = *b"MZBF";
const VERSION: u8 = 1;

/// Write `maze` to `path` in binary form.
pub fn write(path: &Path, maze: &Maze) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    out.write_all(&MAGIC)?;
    out.write_all(&[VERSION])?;
    out.write_all(&(maze.width() as u32).to_le_bytes())?;
    out.write_all(&(maze.height() as u32).to_le_bytes())?;
    out.write_all(maze.cell_bytes())?;
    out.flush()
        .with_context(|| format!("cannot write {}", path.display()))
}

/// Read a maze previously written by [`write`].
///
/// The header is validated before any cell data is touched; dimensions
/// outside the accepted range are rejected, which also bounds the
/// allocation for the cell buffer.
pub fn read(path: &Path) -> Result<Maze> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut input = BufReader::new(file);

    let mut magic = [0u8; 4];
    input.read_exact(&mut magic)?;
    if magic != MAGIC {
        bail!("{} is not a maze file", path.display());
    }
    let mut version = [0u8; 1];
    input.read_exact(&mut version)?;
    if version[0] != VERSION {
        bail!("unsupported maze file version {}", version[0]);
    }

    let mut dim = [0u8; 4];
    input.read_exact(&mut dim)?;
    let width = u32::from_le_bytes(dim) as usize;
    input.read_exact(&mut dim)?;
    let height = u32::from_le_bytes(dim) as usize;
    for (name, value) in [("width", width), ("height", height)] {
        if !(Maze::MIN_DIM..=Maze::MAX_DIM).contains(&value) {
            bail!(
                "maze {} {} is outside the supported range {}..={}",
                name,
                value,
                Maze::MIN_DIM,
                Maze::MAX_DIM
            );
        }
    }

    let mut cells = vec![0u8; width * height];
    input
        .read_exact(&mut cells)
        .with_context(|| format!("{} is truncated", path.display()))?;
    Maze::from_parts(width, height, cells)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::generator::{GenerateAlgorithm, MazeGenerator};

    use super::{read, write, MAGIC, VERSION};

    #[test]
    fn round_trip_preserves_the_maze() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maze.bin");
        let maze = MazeGenerator::new(Some(5)).generate(GenerateAlgorithm::Eller, 11, 7);

        write(&path, &maze).unwrap();
        let loaded = read(&path).unwrap();
        assert_eq!(loaded, maze);
    }

    #[test]
    fn rejects_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-maze.bin");
        fs::write(&path, b"definitely not a maze").unwrap();
        assert!(read(&path).is_err());
    }

    #[test]
    fn rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maze.bin");
        let mut bytes = MAGIC.to_vec();
        bytes.push(VERSION + 1);
        bytes.extend(4u32.to_le_bytes());
        bytes.extend(4u32.to_le_bytes());
        bytes.extend([0u8; 16]);
        fs::write(&path, bytes).unwrap();
        assert!(read(&path).is_err());
    }

    #[test]
    fn rejects_out_of_range_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maze.bin");
        let mut bytes = MAGIC.to_vec();
        bytes.push(VERSION);
        bytes.extend(3u32.to_le_bytes());
        bytes.extend(8u32.to_le_bytes());
        bytes.extend([0u8; 24]);
        fs::write(&path, bytes).unwrap();
        assert!(read(&path).is_err());
    }

    #[test]
    fn rejects_truncated_cell_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maze.bin");
        let mut bytes = MAGIC.to_vec();
        bytes.push(VERSION);
        bytes.extend(4u32.to_le_bytes());
        bytes.extend(4u32.to_le_bytes());
        bytes.extend([0u8; 10]);
        fs::write(&path, bytes).unwrap();
        assert!(read(&path).is_err());
    }
}
