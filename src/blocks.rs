//! Splits the input into runs of characters sharing a compaction mode and
//! merges short runs into their neighbours when that saves codewords.

use core::fmt;

use log::debug;

/// Compaction mode of a block. The discriminant is the latch codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Mode {
    Text = 900,
    Binary = 901,
    Numeric = 902,
}

impl Mode {
    pub const fn of(c: char) -> Self {
        match c {
            '0'..='9' => Mode::Numeric,
            '\t' | '\n' | '\r' | ' '..='~' => Mode::Text,
            _ => Mode::Binary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub mode: Mode,
    /// Number of input characters covered.
    pub count: usize,
}

impl Block {
    pub const fn new(mode: Mode, count: usize) -> Self {
        Self { mode, count }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.mode {
            Mode::Text => 'T',
            Mode::Binary => 'B',
            Mode::Numeric => 'N',
        };
        write!(f, "{tag}{}", self.count)
    }
}

/// Input characters reduced to their low 8 bits, alongside the blocks
/// covering them. Characters above U+00FF are truncated, not rejected.
#[derive(Debug, Clone)]
pub struct Payload {
    bytes: Vec<u8>,
    blocks: Vec<Block>,
}

impl Payload {
    /// Classifies `data` and runs the block optimizer.
    pub fn new(data: &str) -> Self {
        let bytes = data.chars().map(|c| (c as u32 & 0xFF) as u8).collect();
        let mut blocks = split(data);
        optimize(&mut blocks);

        if log::log_enabled!(log::Level::Debug) {
            let list: Vec<String> = blocks.iter().map(Block::to_string).collect();
            debug!("optimized blocks: [{}]", list.join(" "));
        }

        Self { bytes, blocks }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Iterates over `(block, bytes covered by the block)`.
    pub fn segments(&self) -> impl Iterator<Item = (Block, &[u8])> + '_ {
        let mut offset = 0;
        self.blocks.iter().map(move |&block| {
            let bytes = &self.bytes[offset..offset + block.count];
            offset += block.count;
            (block, bytes)
        })
    }
}

/// Groups consecutive characters of the same mode into blocks, in input order.
pub fn split(data: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    for c in data.chars() {
        let mode = Mode::of(c);
        match blocks.last_mut() {
            Some(last) if last.mode == mode => last.count += 1,
            _ => blocks.push(Block::new(mode, 1)),
        }
    }
    blocks
}

/// Relabels numeric blocks too short to pay for a latch, regroups, then does
/// the same for text blocks squeezed between binary blocks. A relabelled block
/// joins its neighbour of the new mode, the neighbour's mode prevails.
pub fn optimize(blocks: &mut Vec<Block>) {
    relabel_numeric(blocks);
    regroup(blocks);
    relabel_text(blocks);
    regroup(blocks);
}

fn relabel_numeric(blocks: &mut [Block]) {
    let n = blocks.len();
    if n < 2 {
        return;
    }

    for i in 0..n {
        if blocks[i].mode != Mode::Numeric {
            continue;
        }
        let count = blocks[i].count;

        let mode = if i == 0 {
            match blocks[1].mode {
                Mode::Text if count < 8 => Mode::Text,
                Mode::Binary if count == 1 => Mode::Binary,
                _ => continue,
            }
        } else if i == n - 1 {
            match blocks[i - 1].mode {
                Mode::Text if count < 8 => Mode::Text,
                Mode::Binary if count == 1 => Mode::Binary,
                _ => continue,
            }
        } else {
            match (blocks[i - 1].mode, blocks[i + 1].mode) {
                (Mode::Binary, Mode::Binary) if count < 4 => Mode::Binary,
                (Mode::Text, Mode::Binary) if count < 5 => Mode::Text,
                (Mode::Text, Mode::Text) if count < 8 => Mode::Text,
                (Mode::Binary, Mode::Text) if count == 1 => Mode::Binary,
                (Mode::Binary, Mode::Text) if count < 8 => Mode::Text,
                _ => continue,
            }
        };
        blocks[i].mode = mode;
    }
}

fn relabel_text(blocks: &mut [Block]) {
    let n = blocks.len();

    // the first block always stays text: text is the initial mode
    for i in 1..n {
        if blocks[i].mode != Mode::Text {
            continue;
        }
        let count = blocks[i].count;
        let before = blocks[i - 1].mode == Mode::Binary;

        let to_binary = if i == n - 1 {
            before && count == 1
        } else {
            let after = blocks[i + 1].mode == Mode::Binary;
            match (before, after) {
                (true, true) => count < 5,
                (true, false) | (false, true) => count < 3,
                (false, false) => false,
            }
        };

        if to_binary {
            blocks[i].mode = Mode::Binary;
        }
    }
}

/// Merges adjacent blocks sharing a mode, summing their counts.
fn regroup(blocks: &mut Vec<Block>) {
    blocks.dedup_by(|next, prev| {
        if next.mode == prev.mode {
            prev.count += next.count;
            true
        } else {
            false
        }
    });
}
