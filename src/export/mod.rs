//! Build exports: OBJ mesh, layer-by-layer instructions and share links

pub mod instructions;
pub mod obj;
pub mod share;

use std::path::{Path, PathBuf};

use crate::block::BlockSet;
use crate::core::types::Result;

pub use instructions::to_instructions;
pub use obj::to_obj;
pub use share::share_link;

/// File-name-safe form of a build name
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() { "build".to_string() } else { stem }
}

/// `<name>.obj`
pub fn obj_file_name(name: &str) -> String {
    format!("{}.obj", file_stem(name))
}

/// `<name>_instructions.txt`
pub fn instructions_file_name(name: &str) -> String {
    format!("{}_instructions.txt", file_stem(name))
}

/// Write the OBJ mesh and the instructions for `set` into `dir`.
///
/// Returns the paths of the mesh and the instructions, in that order.
pub fn write_exports(dir: impl AsRef<Path>, set: &BlockSet, name: &str) -> Result<(PathBuf, PathBuf)> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let obj_path = dir.join(obj_file_name(name));
    std::fs::write(&obj_path, to_obj(set, name))?;

    let instructions_path = dir.join(instructions_file_name(name));
    std::fs::write(&instructions_path, to_instructions(set, name))?;

    log::info!(
        "Exported {:?} ({} blocks) to {}",
        name, set.len(), dir.display()
    );
    Ok((obj_path, instructions_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockColor};

    #[test]
    fn test_file_names() {
        assert_eq!(obj_file_name("red heart"), "red heart.obj");
        assert_eq!(instructions_file_name("a/b"), "a_b_instructions.txt");
        assert_eq!(obj_file_name("  "), "build.obj");
    }

    #[test]
    fn test_write_exports() {
        let dir = tempfile::tempdir().unwrap();
        let set = BlockSet::from_blocks([Block::new(0, 0, 0, BlockColor::rgb(255, 0, 0))]);

        let (obj, text) = write_exports(dir.path().join("out"), &set, "cube").unwrap();
        assert_eq!(obj.file_name().unwrap(), "cube.obj");
        assert_eq!(std::fs::read_to_string(&obj).unwrap(), to_obj(&set, "cube"));
        assert_eq!(std::fs::read_to_string(&text).unwrap(), to_instructions(&set, "cube"));
    }
}
