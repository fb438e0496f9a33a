use gcn_asm::{Assembled, Assembler, EncodeError, Encoded, LineError};

fn asm(line: &str) -> Result<Option<Assembled>, LineError> {
    Assembler::default().assemble_line(line)
}

fn word(line: &str) -> Encoded {
    asm(line).unwrap().unwrap().encoded
}

fn encode_err(line: &str) -> EncodeError {
    match asm(line) {
        Err(LineError::Encode { source, .. }) => source,
        other => panic!("expected an encoding error, got {other:?}"),
    }
}

#[test]
fn registers_and_inline_constant() {
    // base 0x80000000, SDST = s5, SSRC1 = s3, SSRC0 = 129 + 41
    let a = asm("s_add_u32 s5, s3, 42\n").unwrap().unwrap();
    assert_eq!(a.mnemonic, "s_add_u32");
    assert_eq!(a.encoded, Encoded { word: 0x8005_03AA, literal: None });
}

#[test]
fn literal_in_ssrc0() {
    assert_eq!(word("s_add_u32 s5, s3, 1000"), Encoded { word: 0x8005_03FF, literal: Some(0x0000_03E8) });
}

#[test]
fn literal_in_ssrc1() {
    assert_eq!(
        word("s_mul_i32 s2, 0x12345678, s4"),
        Encoded { word: 0x9302_FF04, literal: Some(0x1234_5678) }
    );
}

#[test]
fn negative_literal_is_twos_complement() {
    assert_eq!(word("s_add_i32 s0, s1, -17").literal, Some(0xFFFF_FFEF));
}

#[test]
fn named_and_inline_operands() {
    assert_eq!(word("s_sub_u32 s1, -1, vcc_lo").word, 0x8081_C16A);
    assert_eq!(word("s_and_b32 t3, exec_lo, 0x10").word, 0x8773_7E90);
    assert_eq!(word("s_or_b32 s0, 0, s103").word, 0x8800_8067);
    assert_eq!(word("s_xor_b32 m0, 1.0, scc").word, 0x897C_F2FD);
}

#[test]
fn separators_and_comments() {
    let expected = word("s_add_u32 s5, s3, 42");
    assert_eq!(word("  s_add_u32\ts5,s3 ,  42   ; sum"), expected);
    assert_eq!(word("s_add_u32 s5 s3 42\r\n"), expected);
}

#[test]
fn destination_must_be_a_register() {
    assert!(matches!(encode_err("s_add_u32 5, s1, s2"), EncodeError::InvalidSdst(_)));
    assert!(matches!(encode_err("s_add_u32 0, s1, s2"), EncodeError::InvalidSdst(_)));
    assert!(matches!(encode_err("s_add_u32 scc, s1, s2"), EncodeError::InvalidSdst(_)));
    assert!(matches!(encode_err("s_add_u32 1000, s1, s2"), EncodeError::InvalidSdst(_)));
    assert_eq!((word("s_add_u32 vcc_hi, s1, s2").word >> 16) & 0x7F, 107);
}

#[test]
fn sdst_sgpr_range() {
    assert_eq!(word("s_add_u32 s103, s0, s0").word, 0x8067_0000);
    let err = encode_err("s_add_u32 s104, s0, s0");
    assert_eq!(err.to_string(), "SDST: invalid SGPR number 104");
    assert!(encode_err("s_add_u32 s-1, s0, s0").to_string().contains("invalid SGPR number"));
}

#[test]
fn two_literals_rejected_regardless_of_value() {
    assert_eq!(encode_err("s_add_u32 s0, 100, 200"), EncodeError::DuplicateLiteral);
    assert_eq!(encode_err("s_add_u32 s0, 100, 100"), EncodeError::DuplicateLiteral);
}

#[test]
fn malformed_register_emits_nothing() {
    let err = asm("s_add_u32 s1, sXYZ, s2").unwrap_err();
    assert!(!err.is_recoverable());
    assert!(err.to_string().contains("parsing operand (SGPR value)"));
}
