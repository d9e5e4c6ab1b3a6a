use hackasm::{assemble_program, assemble_with_debug, disasm::disassemble, Assembler, SyntaxError};
use hackdbg::Hdb;

#[test]
fn test_errors_are_collected_per_line() {
    let program_text = include_str!("../programs/errors.asm");
    let mut assembler = Assembler::from_source(program_text);
    assembler.assemble();

    let errors: Vec<_> = assembler
        .errors()
        .iter()
        .map(|e| (e.line, e.error.clone()))
        .collect();
    assert_eq!(
        errors,
        vec![
            (2, SyntaxError::InvalidDestination("X".into())),
            (4, SyntaxError::InvalidLabel("2BAD".into())),
            (6, SyntaxError::InvalidJump("JXX".into())),
            (7, SyntaxError::InvalidComputation("A+D".into())),
            (8, SyntaxError::ConstantOutOfRange("40000".into())),
        ]
    );

    assert_eq!(
        assembler.binary_code(),
        [
            "0000000000010000",
            "1110101010001000",
            "0000000000010000",
            "0000000000010000",
            "1111110111001000",
        ]
    );
    assert_eq!(
        assembler.line_map().pairs(),
        vec![(1, 0), (3, 1), (5, 2), (9, 3), (10, 4)]
    );
    assert_eq!(assembler.source_lines().len(), 12);
}

#[test]
fn test_assemble_program_reports_errors() {
    let err = assemble_program("@1\nX=D+A\n").unwrap_err();
    let message = err.to_string();

    assert!(message.contains("1 syntax error"));
    assert!(message.contains("line 1: Invalid destination: 'X'"));
}

#[test]
fn test_disassembly_reassembles() {
    let program_text = include_str!("../programs/max.asm");
    let mut assembler = Assembler::from_source(program_text);
    assembler.assemble();

    let listing = disassemble(assembler.binary_code()).unwrap();
    assert_eq!(listing[0], "@0");
    assert_eq!(listing[1], "D=M");
    assert_eq!(listing[5], "D;JGT");

    let reassembled = assemble_program(&listing.join("\n")).unwrap();
    assert_eq!(reassembled, assemble_program(program_text).unwrap());
}

#[test]
fn test_debug_map() {
    let program_text = include_str!("../programs/max.asm");
    let (binary, debug) = assemble_with_debug(program_text, "max").unwrap();
    let hdb = Hdb::from_string(&debug).unwrap();

    assert_eq!(hdb.name, "max");
    assert_eq!(hdb.lines.len(), binary.lines().count());
    assert_eq!(hdb.symbols["OUTPUT_FIRST"], 10);
    assert_eq!(hdb.symbols["OUTPUT_D"], 12);
    assert_eq!(hdb.symbols["INFINITE_LOOP"], 14);

    let line = hdb.line_for_source(13).unwrap();
    assert_eq!(line.binary_line, 10);
    assert_eq!(line.text, "@R0");
    assert!(hdb.line_for_source(12).is_none());
}

#[test]
fn test_symbols_and_labels_share_one_table() {
    let program_text = include_str!("../programs/rect.asm");
    let mut assembler = Assembler::from_source(program_text);
    assembler.assemble();

    let symbols = assembler.symbols();
    assert_eq!(symbols.lookup("LOOP"), Some(10));
    assert_eq!(symbols.lookup("INFINITE_LOOP"), Some(23));
    assert_eq!(symbols.lookup("counter"), Some(16));
    assert_eq!(symbols.lookup("address"), Some(17));
}
