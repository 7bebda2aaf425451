//! Layer-by-layer build instructions

use std::fmt::Write;

use crate::block::BlockSet;

/// Plain-text instructions: one step per layer, lowest first.
pub fn to_instructions(set: &BlockSet, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Build Instructions for \"{}\"", name);
    out.push('\n');
    let _ = writeln!(out, "Total Blocks: {}", set.len());
    out.push('\n');

    for (step, (height, blocks)) in set.layers().into_iter().enumerate() {
        let _ = writeln!(out, "Step {} (Layer Height {}):", step + 1, height);
        for block in blocks {
            let _ = writeln!(out, " - Place {} block at X:{}, Z:{}", block.color, block.x, block.z);
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockColor};

    #[test]
    fn test_layers_in_ascending_order() {
        let red = BlockColor::rgb(255, 0, 0);
        let blue = BlockColor::rgb(0, 0, 255);
        let set = BlockSet::from_blocks([
            Block::new(0, 2, 0, blue),
            Block::new(-1, 0, 3, red),
            Block::new(4, 0, 0, blue),
        ]);

        let expected = "\
Build Instructions for \"tower\"

Total Blocks: 3

Step 1 (Layer Height 0):
 - Place #FF0000 block at X:-1, Z:3
 - Place #0000FF block at X:4, Z:0

Step 2 (Layer Height 2):
 - Place #0000FF block at X:0, Z:0

";
        assert_eq!(to_instructions(&set, "tower"), expected);
    }

    #[test]
    fn test_empty_set() {
        let text = to_instructions(&BlockSet::empty(), "nothing");
        assert!(text.contains("Total Blocks: 0"));
        assert!(!text.contains("Step"));
    }
}
