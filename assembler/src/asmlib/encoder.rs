//! The encoder: one tokenized line to one 16-bit word.
//!
//! Dispatch is on the operand shape the opcode table declares for
//! each mnemonic.  All range checking happens here, after symbols
//! have been resolved; the tokenizer guarantees nothing beyond token
//! structure.
use base::prelude::*;

use crate::lexer::TokenizedLine;
use crate::symtab::SymbolTable;
use crate::types::{AssemblyError, AssemblyErrorKind};

pub fn encode(
    symtab: &SymbolTable,
    opcode: Opcode,
    line: &TokenizedLine,
) -> Result<Instruction, AssemblyError> {
    match opcode.kind() {
        InstructionKind::Halt => {
            expect_count(line, opcode, 0)?;
            Ok(Instruction::halt())
        }
        InstructionKind::Trap => {
            expect_count(line, opcode, 1)?;
            let code = parse_int(line.line_no, "trap code", 0, 15, &line.operands[0])?;
            Ok(Instruction::trap(code))
        }
        InstructionKind::Immediate => encode_immediate(opcode, line),
        InstructionKind::RegReg => encode_reg_reg(opcode, line),
        InstructionKind::ShiftRotate => encode_shift(opcode, line),
        InstructionKind::Io => encode_io(opcode, line),
        InstructionKind::Memory => encode_memory(symtab, opcode, line),
        InstructionKind::IndexMemory => encode_index_memory(symtab, opcode, line),
    }
}

fn count_mismatch(line: &TokenizedLine, opcode: Opcode, expected: usize) -> AssemblyError {
    AssemblyError::new(
        line.line_no,
        AssemblyErrorKind::OperandCountMismatch {
            mnemonic: opcode.mnemonic().to_string(),
            expected,
            actual: line.operands.len(),
        },
    )
}

fn expect_count(line: &TokenizedLine, opcode: Opcode, expected: usize) -> Result<(), AssemblyError> {
    if line.operands.len() == expected {
        Ok(())
    } else {
        Err(count_mismatch(line, opcode, expected))
    }
}

/// Parse a purely numeric field and range-check it.
fn parse_int(
    line_no: usize,
    field: &'static str,
    min: i64,
    max: i64,
    token: &str,
) -> Result<u16, AssemblyError> {
    let value: i64 = token.parse().map_err(|_| {
        AssemblyError::new(
            line_no,
            AssemblyErrorKind::ExpectedInteger {
                field,
                found: token.to_string(),
            },
        )
    })?;
    if value < min || value > max {
        return Err(AssemblyError::new(
            line_no,
            AssemblyErrorKind::OperandOutOfRange {
                field,
                min,
                max,
                actual: value,
            },
        ));
    }
    Ok(value as u16)
}

/// Resolve an address operand: a decimal integer is used as-is,
/// anything else must be a known label.  The result must fit the
/// 5-bit address field.
fn resolve_address(
    symtab: &SymbolTable,
    line_no: usize,
    token: &str,
) -> Result<u16, AssemblyError> {
    let value: i64 = match symtab.get(token) {
        Some(address) => i64::from(address),
        None => token.parse().map_err(|_| {
            AssemblyError::new(
                line_no,
                AssemblyErrorKind::UndefinedSymbol(token.to_string()),
            )
        })?,
    };
    if !(0..=31).contains(&value) {
        return Err(AssemblyError::new(
            line_no,
            AssemblyErrorKind::OperandOutOfRange {
                field: "address",
                min: 0,
                max: 31,
                actual: value,
            },
        ));
    }
    Ok(value as u16)
}

fn is_indirect_token(token: &str) -> bool {
    token == "1" || token.eq_ignore_ascii_case("I")
}

/// Split off a trailing indirect marker when the operand count
/// allows one.  `base` is the operand count without the marker.
fn split_indirect<'a>(
    line: &'a TokenizedLine,
    opcode: Opcode,
    base: usize,
) -> Result<(&'a [String], bool), AssemblyError> {
    let ops = line.operands.as_slice();
    if ops.len() == base {
        Ok((ops, false))
    } else if ops.len() == base + 1 && is_indirect_token(&ops[base]) {
        Ok((&ops[..base], true))
    } else {
        Err(count_mismatch(line, opcode, base))
    }
}

fn encode_immediate(opcode: Opcode, line: &TokenizedLine) -> Result<Instruction, AssemblyError> {
    match opcode {
        Opcode::Rfs => {
            expect_count(line, opcode, 1)?;
            let imm = parse_int(line.line_no, "immediate", 0, 31, &line.operands[0])?;
            Ok(Instruction::immediate(opcode, 0, imm))
        }
        _ => {
            expect_count(line, opcode, 2)?;
            let r = parse_int(line.line_no, "register", 0, 3, &line.operands[0])?;
            let imm = parse_int(line.line_no, "immediate", 0, 255, &line.operands[1])?;
            Ok(Instruction::immediate(opcode, usize::from(r), imm))
        }
    }
}

fn encode_reg_reg(opcode: Opcode, line: &TokenizedLine) -> Result<Instruction, AssemblyError> {
    match opcode {
        Opcode::Not => {
            expect_count(line, opcode, 1)?;
            let rx = parse_int(line.line_no, "register", 0, 3, &line.operands[0])?;
            Ok(Instruction::reg_reg(opcode, usize::from(rx), 0))
        }
        Opcode::Mlt | Opcode::Dvd => {
            // The result occupies a register pair, so only the even
            // registers are legal, for both operands.
            expect_count(line, opcode, 2)?;
            let rx = parse_int(line.line_no, "register pair", 0, 2, &line.operands[0])?;
            let ry = parse_int(line.line_no, "register pair", 0, 2, &line.operands[1])?;
            for value in [rx, ry] {
                if value % 2 != 0 {
                    return Err(AssemblyError::new(
                        line.line_no,
                        AssemblyErrorKind::OperandOutOfRange {
                            field: "register pair",
                            min: 0,
                            max: 2,
                            actual: i64::from(value),
                        },
                    ));
                }
            }
            Ok(Instruction::reg_reg(opcode, usize::from(rx), usize::from(ry)))
        }
        _ => {
            expect_count(line, opcode, 2)?;
            let rx = parse_int(line.line_no, "register", 0, 3, &line.operands[0])?;
            let ry = parse_int(line.line_no, "register", 0, 3, &line.operands[1])?;
            Ok(Instruction::reg_reg(opcode, usize::from(rx), usize::from(ry)))
        }
    }
}

fn encode_shift(opcode: Opcode, line: &TokenizedLine) -> Result<Instruction, AssemblyError> {
    expect_count(line, opcode, 4)?;
    let r = parse_int(line.line_no, "register", 0, 3, &line.operands[0])?;
    let count = parse_int(line.line_no, "shift count", 0, 15, &line.operands[1])?;
    let left = parse_int(line.line_no, "L/R flag", 0, 1, &line.operands[2])?;
    let logical = parse_int(line.line_no, "A/L flag", 0, 1, &line.operands[3])?;
    Ok(Instruction::shift(
        opcode,
        usize::from(r),
        logical == 1,
        left == 1,
        count,
    ))
}

fn encode_io(opcode: Opcode, line: &TokenizedLine) -> Result<Instruction, AssemblyError> {
    expect_count(line, opcode, 2)?;
    let r = parse_int(line.line_no, "register", 0, 3, &line.operands[0])?;
    let device = parse_int(line.line_no, "device id", 0, 31, &line.operands[1])?;
    Ok(Instruction::io(opcode, usize::from(r), device))
}

fn encode_memory(
    symtab: &SymbolTable,
    opcode: Opcode,
    line: &TokenizedLine,
) -> Result<Instruction, AssemblyError> {
    match opcode {
        // JMA and JSR carry no register; their R field is zero.  A
        // leading explicit 0 is tolerated for dialects that spell
        // all three fields out.
        Opcode::Jma | Opcode::Jsr => {
            let ops = line.operands.as_slice();
            let (ops, indirect) = match ops.len() {
                2 => (&ops[..2], false),
                3 if is_indirect_token(&ops[2]) => (&ops[..2], true),
                3 => {
                    parse_int(line.line_no, "register", 0, 0, &ops[0])?;
                    (&ops[1..3], false)
                }
                4 if is_indirect_token(&ops[3]) => {
                    parse_int(line.line_no, "register", 0, 0, &ops[0])?;
                    (&ops[1..3], true)
                }
                _ => return Err(count_mismatch(line, opcode, 2)),
            };
            let ix = parse_int(line.line_no, "index register", 0, 3, &ops[0])?;
            let addr = resolve_address(symtab, line.line_no, &ops[1])?;
            Ok(Instruction::memory(opcode, 0, usize::from(ix), indirect, addr))
        }
        _ => {
            let (ops, indirect) = split_indirect(line, opcode, 3)?;
            let field = if opcode == Opcode::Jcc {
                "condition code"
            } else {
                "register"
            };
            let r = parse_int(line.line_no, field, 0, 3, &ops[0])?;
            let ix = parse_int(line.line_no, "index register", 0, 3, &ops[1])?;
            let addr = resolve_address(symtab, line.line_no, &ops[2])?;
            Ok(Instruction::memory(
                opcode,
                usize::from(r),
                usize::from(ix),
                indirect,
                addr,
            ))
        }
    }
}

fn encode_index_memory(
    symtab: &SymbolTable,
    opcode: Opcode,
    line: &TokenizedLine,
) -> Result<Instruction, AssemblyError> {
    let (ops, indirect) = split_indirect(line, opcode, 2)?;
    let ix = parse_int(line.line_no, "index register", 1, 3, &ops[0])?;
    let addr = resolve_address(symtab, line.line_no, &ops[1])?;
    Ok(Instruction::index_memory(
        opcode,
        usize::from(ix),
        indirect,
        addr,
    ))
}
