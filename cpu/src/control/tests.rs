//! Execution-unit tests: one scenario per test, driven through the
//! public step/run surface so that fetch, decode, addressing, and PC
//! update are always exercised together.
use base::prelude::*;

use crate::fault::Fault;
use crate::machine::{Machine, RunOutcome, StepOutcome};
use crate::registers::{CC_DIVZERO, CC_EQUAL, CC_OVERFLOW, CC_UNDERFLOW};

/// Programs load at the first non-reserved address.
const ORIGIN: u16 = 6;

fn machine_with(words: &[u16]) -> Machine {
    let mut machine = Machine::new();
    for (offset, word) in words.iter().enumerate() {
        machine
            .mem
            .direct_write(Address::new(ORIGIN + offset as u16), *word)
            .expect("test program must fit in memory");
    }
    machine.regs.pc = Address::new(ORIGIN);
    machine
}

fn poke(machine: &mut Machine, addr: u16, value: u16) {
    machine
        .mem
        .direct_write(Address::new(addr), value)
        .expect("test data must fit in memory");
}

fn poke_text(machine: &mut Machine, start: u16, text: &str) {
    for (offset, ch) in text.chars().enumerate() {
        poke(machine, start + offset as u16, ch as u32 as u16);
    }
}

fn step_ok(machine: &mut Machine) -> StepOutcome {
    machine.step().expect("step should not fault")
}

#[test]
fn fetch_updates_mar_mbr_and_ir() {
    let inst = Instruction::memory(Opcode::Ldr, 0, 0, false, 10);
    let mut machine = machine_with(&[inst.bits()]);
    poke(&mut machine, 10, 0o123);
    assert_eq!(step_ok(&mut machine), StepOutcome::Running);
    assert_eq!(machine.regs.mar, Address::new(ORIGIN));
    assert_eq!(machine.regs.ir, inst.bits());
    assert_eq!(machine.regs.mbr, inst.bits());
    assert_eq!(machine.regs.gpr(0), 0o123);
    assert_eq!(machine.regs.pc, Address::new(ORIGIN + 1));
}

#[test]
fn str_writes_the_register_to_memory() {
    let mut machine = machine_with(&[Instruction::memory(Opcode::Str, 2, 0, false, 20).bits()]);
    machine.regs.set_gpr(2, 0o4567);
    step_ok(&mut machine);
    assert_eq!(machine.mem.direct_read(Address::new(20)).unwrap(), 0o4567);
}

#[test]
fn lda_loads_the_address_not_the_word() {
    let mut machine = machine_with(&[Instruction::memory(Opcode::Lda, 1, 0, false, 20).bits()]);
    poke(&mut machine, 20, 0o777);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(1), 20);
}

#[test]
fn lda_of_address_zero_is_legal() {
    // LDA only materialises the address value, so the reserved-range
    // rule does not apply to it; this is the idiom programs use to
    // zero a register.
    let mut machine = machine_with(&[Instruction::memory(Opcode::Lda, 0, 0, false, 0).bits()]);
    machine.regs.set_gpr(0, 99);
    assert_eq!(step_ok(&mut machine), StepOutcome::Running);
    assert_eq!(machine.regs.gpr(0), 0);
    assert_eq!(machine.regs.pc, Address::new(ORIGIN + 1));
}

#[test]
fn ldx_and_stx_transfer_the_index_register() {
    let mut machine = machine_with(&[
        Instruction::index_memory(Opcode::Ldx, 1, false, 20).bits(),
        Instruction::index_memory(Opcode::Stx, 1, false, 21).bits(),
    ]);
    poke(&mut machine, 20, 0o1234);
    step_ok(&mut machine);
    assert_eq!(machine.regs.ixr(1), 0o1234);
    step_ok(&mut machine);
    assert_eq!(machine.mem.direct_read(Address::new(21)).unwrap(), 0o1234);
}

#[test]
fn ldx_address_ignores_its_own_index_field() {
    // The IX field of LDX names the destination, not an index
    // source; a prior value in that register must not skew the
    // address.
    let mut machine = machine_with(&[Instruction::index_memory(Opcode::Ldx, 2, false, 20).bits()]);
    machine.regs.set_ixr(2, 1000);
    poke(&mut machine, 20, 7);
    step_ok(&mut machine);
    assert_eq!(machine.regs.ixr(2), 7);
}

#[test]
fn indexing_adds_the_index_register() {
    let mut machine = machine_with(&[Instruction::memory(Opcode::Ldr, 0, 1, false, 5).bits()]);
    machine.regs.set_ixr(1, 25);
    poke(&mut machine, 30, 0o55);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 0o55);
}

#[test]
fn indirection_follows_the_pointer_word() {
    let mut machine = machine_with(&[Instruction::memory(Opcode::Ldr, 0, 0, true, 20).bits()]);
    poke(&mut machine, 20, 30);
    poke(&mut machine, 30, 0o66);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 0o66);
}

#[test]
fn plain_address_31_is_in_range() {
    let mut machine = machine_with(&[Instruction::memory(Opcode::Ldr, 0, 0, false, 31).bits()]);
    poke(&mut machine, 31, 0o31);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 0o31);
}

#[test]
fn reserved_effective_address_faults() {
    let mut machine = machine_with(&[Instruction::memory(Opcode::Ldr, 0, 0, false, 3).bits()]);
    assert_eq!(machine.step(), Err(Fault::ReservedMemory { addr: 3 }));
    assert_eq!(machine.regs.mfr(), 0b0001);
    // The PC did not advance, and the loop refuses further steps.
    assert_eq!(machine.regs.pc, Address::new(ORIGIN));
    assert_eq!(machine.step(), Ok(StepOutcome::Halted));
}

#[test]
fn indexed_sum_beyond_memory_faults() {
    let mut machine = machine_with(&[Instruction::memory(Opcode::Ldr, 0, 1, false, 31).bits()]);
    machine.regs.set_ixr(1, 2017);
    assert_eq!(machine.step(), Err(Fault::BeyondMemory { addr: 2048 }));
    assert_eq!(machine.regs.mfr(), 0b1000);
}

#[test]
fn indirect_pointer_address_is_checked() {
    // The pointer word itself lives in the reserved range.
    let mut machine = machine_with(&[Instruction::memory(Opcode::Ldr, 0, 0, true, 4).bits()]);
    assert_eq!(machine.step(), Err(Fault::ReservedMemory { addr: 4 }));
}

#[test]
fn indirect_target_address_is_checked() {
    // The pointer is fine but the word it names is reserved.
    let mut machine = machine_with(&[Instruction::memory(Opcode::Ldr, 0, 0, true, 20).bits()]);
    poke(&mut machine, 20, 3);
    assert_eq!(machine.step(), Err(Fault::ReservedMemory { addr: 3 }));
}

#[test]
fn fetch_from_reserved_memory_faults() {
    let mut machine = Machine::new();
    machine.regs.pc = Address::new(3);
    assert_eq!(machine.step(), Err(Fault::ReservedMemory { addr: 3 }));
}

#[test]
fn fetch_beyond_memory_faults() {
    let mut machine = Machine::new();
    machine.regs.pc = Address::new(2048);
    assert_eq!(machine.step(), Err(Fault::BeyondMemory { addr: 2048 }));
}

#[test]
fn unknown_opcode_faults() {
    let mut machine = machine_with(&[0o77 << 10]);
    assert_eq!(machine.step(), Err(Fault::IllegalOpcode { bits: 0o77 }));
    assert_eq!(machine.regs.mfr(), 0b0100);
}

#[test]
fn amr_adds_memory_and_reports_overflow() {
    let mut machine = machine_with(&[
        Instruction::memory(Opcode::Amr, 0, 0, false, 20).bits(),
        Instruction::memory(Opcode::Amr, 0, 0, false, 20).bits(),
    ]);
    poke(&mut machine, 20, 30000);
    machine.regs.set_gpr(0, 10);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 30010);
    assert!(!machine.regs.cc_bit(CC_OVERFLOW));
    step_ok(&mut machine);
    // 30010 + 30000 exceeds the signed 16-bit range.
    assert!(machine.regs.cc_bit(CC_OVERFLOW));
    assert_eq!(machine.regs.gpr(0), 60010_u32 as u16);
}

#[test]
fn smr_subtracts_memory_and_reports_underflow() {
    let mut machine = machine_with(&[Instruction::memory(Opcode::Smr, 0, 0, false, 20).bits()]);
    poke(&mut machine, 20, 30000);
    machine.regs.set_gpr(0, (-10000_i16) as u16);
    step_ok(&mut machine);
    assert!(machine.regs.cc_bit(CC_UNDERFLOW));
    assert!(!machine.regs.cc_bit(CC_OVERFLOW));
}

#[test]
fn air_with_zero_immediate_is_a_no_op() {
    let mut machine = machine_with(&[Instruction::immediate(Opcode::Air, 0, 0).bits()]);
    machine.regs.set_gpr(0, 4321);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 4321);
    assert_eq!(machine.regs.cc(), 0);
}

#[test]
fn air_and_sir_load_directly_into_a_zero_register() {
    let mut machine = machine_with(&[
        Instruction::immediate(Opcode::Air, 0, 31).bits(),
        Instruction::immediate(Opcode::Sir, 1, 5).bits(),
    ]);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 31);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(1) as i16, -5);
}

#[test]
fn air_overflow_is_observed_by_jcc_on_the_next_cycle() {
    // LDR a value close to the top of the signed range, push it over
    // with AIR, then JCC condition 0 (OVERFLOW) must branch.
    let target = ORIGIN + 6;
    let mut machine = machine_with(&[
        Instruction::memory(Opcode::Ldr, 0, 0, false, 30).bits(),
        Instruction::immediate(Opcode::Air, 0, 31).bits(),
        Instruction::memory(Opcode::Jcc, 0, 0, false, target).bits(),
        Instruction::halt().bits(),
    ]);
    poke(&mut machine, 30, 32760);
    poke(&mut machine, target, Instruction::halt().bits());
    step_ok(&mut machine);
    step_ok(&mut machine);
    assert!(machine.regs.cc_bit(CC_OVERFLOW));
    step_ok(&mut machine);
    assert_eq!(machine.regs.pc, Address::new(target));
}

#[test]
fn add_and_sub_use_the_second_register() {
    let mut machine = machine_with(&[
        Instruction::reg_reg(Opcode::Add, 0, 1).bits(),
        Instruction::reg_reg(Opcode::Sub, 0, 2).bits(),
    ]);
    machine.regs.set_gpr(0, 100);
    machine.regs.set_gpr(1, 23);
    machine.regs.set_gpr(2, 200);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 123);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0) as i16, -77);
}

#[test]
fn jz_branches_only_on_zero() {
    let target = ORIGIN + 5;
    let program = [Instruction::memory(Opcode::Jz, 0, 0, false, target).bits()];
    let mut machine = machine_with(&program);
    machine.regs.set_gpr(0, 1);
    step_ok(&mut machine);
    assert_eq!(machine.regs.pc, Address::new(ORIGIN + 1));

    let mut machine = machine_with(&program);
    machine.regs.set_gpr(0, 0);
    step_ok(&mut machine);
    assert_eq!(machine.regs.pc, Address::new(target));
}

#[test]
fn jne_and_jge_test_their_conditions() {
    let target = ORIGIN + 5;
    let mut machine = machine_with(&[Instruction::memory(Opcode::Jne, 1, 0, false, target).bits()]);
    machine.regs.set_gpr(1, 7);
    step_ok(&mut machine);
    assert_eq!(machine.regs.pc, Address::new(target));

    // JGE is a signed comparison: 0x8000 is negative.
    let mut machine = machine_with(&[Instruction::memory(Opcode::Jge, 1, 0, false, target).bits()]);
    machine.regs.set_gpr(1, 0x8000);
    step_ok(&mut machine);
    assert_eq!(machine.regs.pc, Address::new(ORIGIN + 1));
}

#[test]
fn jma_is_unconditional() {
    let mut machine = machine_with(&[Instruction::memory(Opcode::Jma, 0, 0, false, 30).bits()]);
    step_ok(&mut machine);
    assert_eq!(machine.regs.pc, Address::new(30));
}

#[test]
fn jsr_links_through_gpr3_and_rfs_returns() {
    let sub = ORIGIN + 4;
    let mut machine = machine_with(&[
        Instruction::memory(Opcode::Jsr, 0, 0, false, sub).bits(),
        Instruction::halt().bits(),
    ]);
    poke(&mut machine, sub, Instruction::immediate(Opcode::Rfs, 0, 0).bits());
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(3), ORIGIN + 1);
    assert_eq!(machine.regs.pc, Address::new(sub));
    step_ok(&mut machine);
    // Back at the instruction after the JSR, with RFS's immediate in
    // GPR0.
    assert_eq!(machine.regs.pc, Address::new(ORIGIN + 1));
    assert_eq!(machine.regs.gpr(0), 0);
    assert_eq!(machine.step(), Ok(StepOutcome::Halted));
    assert_eq!(machine.regs.pc, Address::new(ORIGIN + 1));
}

#[test]
fn sob_loops_until_the_counter_reaches_zero() {
    let mut machine = machine_with(&[Instruction::memory(Opcode::Sob, 1, 0, false, ORIGIN).bits()]);
    machine.regs.set_gpr(1, 3);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(1), 2);
    assert_eq!(machine.regs.pc, Address::new(ORIGIN));
    step_ok(&mut machine);
    assert_eq!(machine.regs.pc, Address::new(ORIGIN));
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(1), 0);
    assert_eq!(machine.regs.pc, Address::new(ORIGIN + 1));
}

#[test]
fn mlt_fills_the_register_pair() {
    let mut machine = machine_with(&[Instruction::reg_reg(Opcode::Mlt, 0, 2).bits()]);
    machine.regs.set_gpr(0, 300);
    machine.regs.set_gpr(2, 300);
    step_ok(&mut machine);
    // 90000 = 1 * 65536 + 24464.
    assert_eq!(machine.regs.gpr(0), 1);
    assert_eq!(machine.regs.gpr(1), 24464);
    assert!(machine.regs.cc_bit(CC_OVERFLOW));

    let mut machine = machine_with(&[Instruction::reg_reg(Opcode::Mlt, 0, 2).bits()]);
    machine.regs.set_gpr(0, 20);
    machine.regs.set_gpr(2, 3);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 0);
    assert_eq!(machine.regs.gpr(1), 60);
    assert!(!machine.regs.cc_bit(CC_OVERFLOW));
}

#[test]
fn dvd_computes_quotient_and_remainder() {
    let mut machine = machine_with(&[Instruction::reg_reg(Opcode::Dvd, 0, 2).bits()]);
    machine.regs.set_gpr(0, 17);
    machine.regs.set_gpr(2, 5);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 3);
    assert_eq!(machine.regs.gpr(1), 2);
    assert!(!machine.regs.cc_bit(CC_DIVZERO));
}

#[test]
fn dvd_by_zero_sets_divzero_and_skips_the_write() {
    let mut machine = machine_with(&[Instruction::reg_reg(Opcode::Dvd, 0, 2).bits()]);
    machine.regs.set_gpr(0, 17);
    machine.regs.set_gpr(2, 0);
    step_ok(&mut machine);
    assert!(machine.regs.cc_bit(CC_DIVZERO));
    assert_eq!(machine.regs.gpr(0), 17);
    assert_eq!(machine.regs.gpr(1), 0);
    // Faults were not involved: this is a condition, not a fault.
    assert_eq!(machine.regs.mfr(), 0);
}

#[test]
fn trr_owns_only_the_equal_bit() {
    let mut machine = machine_with(&[
        Instruction::reg_reg(Opcode::Trr, 0, 1).bits(),
        Instruction::reg_reg(Opcode::Trr, 0, 2).bits(),
    ]);
    machine.regs.set_gpr(0, 5);
    machine.regs.set_gpr(1, 5);
    machine.regs.set_gpr(2, 6);
    machine.regs.set_cc_bit(CC_OVERFLOW, true);
    step_ok(&mut machine);
    assert!(machine.regs.cc_bit(CC_EQUAL));
    assert!(machine.regs.cc_bit(CC_OVERFLOW));
    step_ok(&mut machine);
    assert!(!machine.regs.cc_bit(CC_EQUAL));
    assert!(machine.regs.cc_bit(CC_OVERFLOW));
}

#[test]
fn bitwise_ops() {
    let mut machine = machine_with(&[
        Instruction::reg_reg(Opcode::And, 0, 1).bits(),
        Instruction::reg_reg(Opcode::Orr, 2, 1).bits(),
        Instruction::reg_reg(Opcode::Not, 1, 0).bits(),
    ]);
    machine.regs.set_gpr(0, 0o1740);
    machine.regs.set_gpr(1, 0o0770);
    machine.regs.set_gpr(2, 0o4000);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 0o0740);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(2), 0o4770);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(1), !0o0770 & 0xFFFF);
}

#[test]
fn shift_left_logical_right_and_arithmetic_right() {
    let mut machine = machine_with(&[Instruction::shift(Opcode::Src, 0, false, true, 3).bits()]);
    machine.regs.set_gpr(0, 1);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 8);

    let mut machine = machine_with(&[Instruction::shift(Opcode::Src, 0, true, false, 3).bits()]);
    machine.regs.set_gpr(0, 0x8000);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 0x1000);

    let mut machine = machine_with(&[Instruction::shift(Opcode::Src, 0, false, false, 3).bits()]);
    machine.regs.set_gpr(0, 0x8000);
    step_ok(&mut machine);
    // Arithmetic right replicates the sign bit.
    assert_eq!(machine.regs.gpr(0), 0xF000);
}

#[test]
fn zero_count_shift_and_rotate_are_no_ops() {
    let mut machine = machine_with(&[
        Instruction::shift(Opcode::Src, 0, true, true, 0).bits(),
        Instruction::shift(Opcode::Rrc, 0, false, true, 0).bits(),
    ]);
    machine.regs.set_gpr(0, 0o52525);
    step_ok(&mut machine);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 0o52525);
}

#[test]
fn rotate_moves_bits_around_the_ends() {
    let mut machine = machine_with(&[Instruction::shift(Opcode::Rrc, 0, false, true, 4).bits()]);
    machine.regs.set_gpr(0, 0x8001);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 0x0018);

    let mut machine = machine_with(&[Instruction::shift(Opcode::Rrc, 0, false, false, 1).bits()]);
    machine.regs.set_gpr(0, 0x0001);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 0x8000);
}

#[test]
fn in_suspends_on_an_empty_buffer_and_resumes_after_deposit() {
    let mut machine = machine_with(&[
        Instruction::io(Opcode::In, 0, 0).bits(),
        Instruction::halt().bits(),
    ]);
    assert_eq!(machine.step(), Ok(StepOutcome::AwaitingInput));
    // Suspension is observable but not a fault; PC stands still.
    assert_eq!(machine.regs.pc, Address::new(ORIGIN));
    assert_eq!(machine.regs.mfr(), 0);
    machine.io.deposit_input("A");
    assert_eq!(machine.step(), Ok(StepOutcome::Running));
    assert_eq!(machine.regs.gpr(0), u16::from(b'A'));
    assert_eq!(machine.regs.pc, Address::new(ORIGIN + 1));
}

#[test]
fn out_emits_the_low_byte() {
    let mut machine = machine_with(&[Instruction::io(Opcode::Out, 0, 1).bits()]);
    machine.regs.set_gpr(0, 0x4142);
    step_ok(&mut machine);
    assert_eq!(machine.io.printed(), b"B");
}

#[test]
fn chk_reports_device_readiness() {
    let mut machine = machine_with(&[
        Instruction::io(Opcode::Chk, 0, 0).bits(),
        Instruction::io(Opcode::Chk, 1, 1).bits(),
        Instruction::io(Opcode::Chk, 2, 0).bits(),
    ]);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(0), 0);
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(1), 1);
    machine.io.deposit_input("x");
    step_ok(&mut machine);
    assert_eq!(machine.regs.gpr(2), 1);
}

#[test]
fn trap_read_word_then_print_echoes_the_word() {
    let mut machine = machine_with(&[
        Instruction::trap(2).bits(),
        Instruction::trap(1).bits(),
        Instruction::halt().bits(),
    ]);
    machine.regs.set_gpr(0, 100);
    machine.io.deposit_input("  word next\n");
    let outcome = machine.run(100).expect("program should not fault");
    assert_eq!(outcome, RunOutcome::Halted { cycles: 2 });
    assert_eq!(machine.regs.gpr(1), 4);
    assert_eq!(machine.io.printed(), b"word");
    // The delimiter was consumed; the rest of the input is intact.
    assert!(machine.io.keyboard_ready());
}

#[test]
fn trap_load_file_deposits_the_configured_text() {
    let mut machine = machine_with(&[
        Instruction::trap(0).bits(),
        Instruction::halt().bits(),
    ]);
    machine.set_trap_source("abc");
    machine.regs.set_gpr(0, 200);
    machine.run(100).unwrap();
    assert_eq!(machine.regs.gpr(1), 3);
    for (offset, expected) in b"abc".iter().enumerate() {
        let addr = Address::new(200 + offset as u16);
        assert_eq!(
            machine.mem.direct_read(addr).unwrap(),
            u16::from(*expected)
        );
    }
}

#[test]
fn trap_paragraph_search_finds_window() {
    let paragraph = "Rain falls gently against the window. A gentle rain often brings \
         peace, yet sometimes it hides a storm. The children watch the rain as it \
         gathers into puddles that reflect the sky.";
    let mut machine = machine_with(&[
        Instruction::trap(3).bits(),
        Instruction::halt().bits(),
    ]);
    poke_text(&mut machine, 100, paragraph);
    poke_text(&mut machine, 600, "window");
    machine.regs.set_gpr(0, 100);
    machine.regs.set_gpr(1, paragraph.chars().count() as u16);
    machine.regs.set_gpr(2, 600);
    machine.regs.set_gpr(3, 6);
    machine.run(100).unwrap();
    assert_eq!(machine.regs.gpr(0), 1);
    assert_eq!(machine.regs.gpr(1), 6);
}

#[test]
fn trap_paragraph_search_reports_a_miss() {
    let mut machine = machine_with(&[
        Instruction::trap(3).bits(),
        Instruction::halt().bits(),
    ]);
    poke_text(&mut machine, 100, "One sentence only.");
    poke_text(&mut machine, 600, "zebra");
    machine.regs.set_gpr(0, 100);
    machine.regs.set_gpr(1, 18);
    machine.regs.set_gpr(2, 600);
    machine.regs.set_gpr(3, 5);
    machine.run(100).unwrap();
    assert_eq!(machine.regs.gpr(0), 0);
}

#[test]
fn reserved_trap_codes_fault() {
    let mut machine = machine_with(&[Instruction::trap(9).bits()]);
    assert_eq!(machine.step(), Err(Fault::IllegalTrap { code: 9 }));
    assert_eq!(machine.regs.mfr(), 0b0010);
}

#[test]
fn run_honours_the_cycle_bound() {
    let mut machine = machine_with(&[Instruction::memory(Opcode::Jma, 0, 0, false, ORIGIN).bits()]);
    assert_eq!(machine.run(10), Ok(RunOutcome::Stopped { cycles: 10 }));
}

#[test]
fn reset_clears_a_faulted_machine() {
    let mut machine = machine_with(&[Instruction::trap(9).bits()]);
    let _ = machine.step();
    assert_ne!(machine.regs.mfr(), 0);
    machine.reset();
    assert_eq!(machine.regs.mfr(), 0);
    assert_eq!(machine.regs.pc, Address::ZERO);
    assert_eq!(machine.mem.direct_read(Address::new(ORIGIN)).unwrap(), 0);
    assert!(machine.io.printed().is_empty());
}
