//! The two-pass assembler driver.
//!
//! Pass 1 walks the tokenized program with a location counter,
//! recording labels and validating every head; pass 2 re-walks with
//! the counter reset, encoding words and emitting the two output
//! streams: the listing (source order, blank and comment lines
//! reproduced verbatim) and the load image (one `address word`
//! record per emitted word, both in octal).
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{event, Level};

use base::prelude::*;

use crate::encoder::encode;
use crate::lexer::{tokenize_line, Directive, Head, TokenizedLine};
use crate::symtab::SymbolTable;
use crate::types::{AssemblerFailure, AssemblyError, AssemblyErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyOutput {
    pub listing: Vec<String>,
    pub load: Vec<String>,
}

/// Assemble a whole source text.  Stops at the first error.
pub fn assemble_source(source: &str) -> Result<AssemblyOutput, AssemblyError> {
    let mut lines: Vec<(String, Option<TokenizedLine>)> = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let tokenized = tokenize_line(index + 1, raw)?;
        lines.push((raw.to_string(), tokenized));
    }
    let symtab = pass1(&lines)?;
    for (name, address) in symtab.iter() {
        event!(Level::DEBUG, "symbol {name} -> {address}");
    }
    let output = pass2(&lines, &symtab)?;
    event!(
        Level::INFO,
        "assembled {} words from {} source lines",
        output.load.len(),
        lines.len()
    );
    Ok(output)
}

/// Assemble `input` and write the listing and load files.
pub fn assemble_file(
    input: &Path,
    out_list: &Path,
    out_load: &Path,
) -> Result<(), AssemblerFailure> {
    let source = fs::read_to_string(input).map_err(|error| AssemblerFailure::Io {
        path: input.to_path_buf(),
        error,
    })?;
    let output = assemble_source(&source)?;
    write_lines(out_list, &output.listing)?;
    write_lines(out_load, &output.load)?;
    Ok(())
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), AssemblerFailure> {
    let io_failure = |error| AssemblerFailure::Io {
        path: path.to_path_buf(),
        error,
    };
    let file = fs::File::create(path).map_err(io_failure)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{line}").map_err(io_failure)?;
    }
    writer.flush().map_err(io_failure)
}

/// Parse and range-check the argument of a LOC directive.
fn loc_target(line: &TokenizedLine) -> Result<u32, AssemblyError> {
    if line.operands.len() != 1 {
        return Err(AssemblyError::new(
            line.line_no,
            AssemblyErrorKind::MalformedDirective(
                "LOC requires exactly one decimal address".to_string(),
            ),
        ));
    }
    let value: u32 = line.operands[0].parse().map_err(|_| {
        AssemblyError::new(
            line.line_no,
            AssemblyErrorKind::MalformedDirective(format!(
                "LOC requires a decimal address, found '{}'",
                line.operands[0]
            )),
        )
    })?;
    if value >= MEMORY_SIZE as u32 {
        return Err(AssemblyError::new(
            line.line_no,
            AssemblyErrorKind::OperandOutOfRange {
                field: "location",
                min: 0,
                max: MEMORY_SIZE as i64 - 1,
                actual: i64::from(value),
            },
        ));
    }
    Ok(value)
}

fn pass1(lines: &[(String, Option<TokenizedLine>)]) -> Result<SymbolTable, AssemblyError> {
    let mut symtab = SymbolTable::new();
    let mut loc: u32 = 0;
    for (_, tokenized) in lines {
        let Some(line) = tokenized else { continue };
        if let Some(label) = &line.label {
            symtab
                .put(label, loc as u16)
                .map_err(|kind| AssemblyError::new(line.line_no, kind))?;
        }
        match &line.head {
            None => {}
            Some(Head::Directive(Directive::Loc)) => {
                loc = loc_target(line)?;
            }
            Some(Head::Directive(Directive::Data)) => {
                if line.operands.len() != 1 {
                    return Err(AssemblyError::new(
                        line.line_no,
                        AssemblyErrorKind::MalformedDirective(
                            "DATA requires exactly one value".to_string(),
                        ),
                    ));
                }
                loc += 1;
            }
            Some(Head::Mnemonic(mnemonic)) => {
                if Opcode::from_mnemonic(mnemonic).is_none() {
                    return Err(AssemblyError::new(
                        line.line_no,
                        AssemblyErrorKind::UnknownOpcode(mnemonic.clone()),
                    ));
                }
                loc += 1;
            }
        }
    }
    Ok(symtab)
}

/// Resolve a DATA operand: label first, then decimal (negative
/// values wrap into the 16-bit word).
fn resolve_data(
    symtab: &SymbolTable,
    line_no: usize,
    token: &str,
) -> Result<Word, AssemblyError> {
    if let Some(address) = symtab.get(token) {
        return Ok(address);
    }
    let value: i64 = token.parse().map_err(|_| {
        AssemblyError::new(line_no, AssemblyErrorKind::UndefinedSymbol(token.to_string()))
    })?;
    Ok((value & 0xFFFF) as u16)
}

/// Append one emitted word to both output streams.
fn emit_word(
    listing: &mut Vec<String>,
    load: &mut Vec<String>,
    loc: u32,
    word: Word,
    line: &TokenizedLine,
) -> Result<(), AssemblyError> {
    if loc >= MEMORY_SIZE as u32 {
        return Err(AssemblyError::new(
            line.line_no,
            AssemblyErrorKind::OperandOutOfRange {
                field: "location counter",
                min: 0,
                max: MEMORY_SIZE as i64 - 1,
                actual: i64::from(loc),
            },
        ));
    }
    listing.push(format!(
        "{loc:06o} {word:06o} {}{}",
        line.reconstruct(),
        line.trailing_comment()
    ));
    load.push(format!("{loc:06o} {word:06o}"));
    Ok(())
}

fn pass2(
    lines: &[(String, Option<TokenizedLine>)],
    symtab: &SymbolTable,
) -> Result<AssemblyOutput, AssemblyError> {
    let mut listing = Vec::with_capacity(lines.len());
    let mut load = Vec::new();
    let mut loc: u32 = 0;

    for (raw, tokenized) in lines {
        let Some(line) = tokenized else {
            // Blank or comment-only: reproduced verbatim, no data
            // row.
            listing.push(raw.clone());
            continue;
        };
        match &line.head {
            None => {
                // Label-only.
                listing.push(raw.clone());
            }
            Some(Head::Directive(Directive::Loc)) => {
                loc = loc_target(line)?;
                listing.push(format!(
                    "    {}{}",
                    line.reconstruct(),
                    line.trailing_comment()
                ));
            }
            Some(Head::Directive(Directive::Data)) => {
                let word = resolve_data(symtab, line.line_no, &line.operands[0])?;
                emit_word(&mut listing, &mut load, loc, word, line)?;
                loc += 1;
            }
            Some(Head::Mnemonic(mnemonic)) => {
                let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| {
                    AssemblyError::new(
                        line.line_no,
                        AssemblyErrorKind::UnknownOpcode(mnemonic.clone()),
                    )
                })?;
                let word = encode(symtab, opcode, line)?.bits();
                emit_word(&mut listing, &mut load, loc, word, line)?;
                loc += 1;
            }
        }
    }
    Ok(AssemblyOutput { listing, load })
}
