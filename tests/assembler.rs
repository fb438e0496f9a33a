use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use gcn_asm::encoder::Encoder;
use gcn_asm::instructions::{EncodingFamily, InstrDesc};
use gcn_asm::listing::{fmt_assembled, to_binary};
use gcn_asm::{AsmConfig, Assembler, EncodeError, Encoded, IsaTables, LineError};

#[test]
fn blank_and_comment_lines_are_skipped() {
    let asm = Assembler::default();
    for line in ["", "\n", "   \t", "; only a comment", "  ;x\r\n"] {
        assert_eq!(asm.assemble_line(line), Ok(None), "{line:?}");
    }
}

#[test]
fn unknown_mnemonic_is_recoverable() {
    let asm = Assembler::default();
    let err = asm.assemble_line("v_bogus s1, s2, s3").unwrap_err();
    assert_eq!(err, LineError::Unrecognized("v_bogus".into()));
    assert!(err.is_recoverable());
    assert!(asm.assemble_line("S_ADD_U32 s1, s2, s3").is_err());
}

#[test]
fn other_families_are_unsupported() {
    let asm = Assembler::default();
    let err = asm.assemble_line("s_endpgm").unwrap_err();
    assert_eq!(err, LineError::Unsupported("s_endpgm".into()));
    assert!(err.is_recoverable());
    assert_eq!(err.to_string(), "unsupported encoding type for instruction 's_endpgm'");
}

const SOURCE: &str = "\
; scalar test
s_add_u32 s5, s3, 42
s_mov_b32 s0, s1
s_add_u32 s0, 100, 200
s_add_u32 s5, s3, 1000 ; literal

bogus
";

#[test]
fn source_lines_are_reported_in_order() {
    let reports = Assembler::default().assemble_source(SOURCE);
    let lines: Vec<usize> = reports.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![2, 3, 4, 5, 7]);

    let listing: Vec<String> = reports
        .iter()
        .filter_map(|r| r.result.as_ref().ok())
        .map(fmt_assembled)
        .collect();
    assert_eq!(
        listing,
        vec!["s_add_u32 \t0x800503aa".to_string(), "s_add_u32 \t0x800503ff 0x000003e8".to_string()]
    );
    assert_eq!(
        reports[2].result,
        Err(LineError::Encode { mnemonic: "s_add_u32".into(), source: EncodeError::DuplicateLiteral })
    );
}

#[test]
fn stop_on_error_ends_the_run() {
    let cfg = AsmConfig { stop_on_error: true, ..AsmConfig::default() };
    let reports = Assembler::new(IsaTables::default(), cfg).assemble_source(SOURCE);
    // the unsupported s_mov_b32 does not stop the run, the duplicate literal does
    let lines: Vec<usize> = reports.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![2, 3, 4]);
}

#[test]
fn binary_output_follows_line_order() {
    let reports = Assembler::default().assemble_source(SOURCE);
    assert_eq!(
        to_binary(&reports),
        vec![0xAA, 0x03, 0x05, 0x80, 0xFF, 0x03, 0x05, 0x80, 0xE8, 0x03, 0x00, 0x00]
    );
}

#[test]
fn lenient_config_ignores_extra_fields() {
    let line = "s_add_u32 s1, s2, s3, s4";
    assert!(Assembler::default().assemble_line(line).is_err());
    let cfg = AsmConfig { strict_operands: false, ..AsmConfig::default() };
    let a = Assembler::new(IsaTables::default(), cfg).assemble_line(line).unwrap().unwrap();
    assert_eq!(a.encoded.word, 0x8001_0203);
}

struct FixedSopp;

impl Encoder for FixedSopp {
    fn family(&self) -> EncodingFamily {
        EncodingFamily::Sopp
    }

    fn encode(&self, _: &IsaTables, instr: &InstrDesc, _: &str) -> Result<Encoded, EncodeError> {
        Ok(Encoded { word: instr.base_opcode, literal: None })
    }
}

#[test]
fn extra_families_can_be_registered() {
    let asm = Assembler::default().with_encoder(Box::new(FixedSopp));
    let a = asm.assemble_line("s_endpgm").unwrap().unwrap();
    assert_eq!(a.encoded.word, 0xBF81_0000);
    assert!(asm.assemble_line("s_add_u32 s5, s3, 42").unwrap().is_some());
}

#[derive(Clone, Default)]
struct LevelCount {
    warn: Arc<AtomicUsize>,
    error: Arc<AtomicUsize>,
}

impl<S: Subscriber> Layer<S> for LevelCount {
    fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
        match *event.metadata().level() {
            Level::WARN => self.warn.fetch_add(1, Ordering::SeqCst),
            Level::ERROR => self.error.fetch_add(1, Ordering::SeqCst),
            _ => 0,
        };
    }
}

#[test]
fn every_failed_line_is_logged() {
    let counts = LevelCount::default();
    let subscriber = tracing_subscriber::registry().with(counts.clone());
    let reports = tracing::subscriber::with_default(subscriber, || Assembler::default().assemble_source(SOURCE));

    let failed = reports.iter().filter(|r| r.result.is_err()).count();
    // unsupported s_mov_b32 and bogus warn, the duplicate literal is an error
    assert_eq!(counts.warn.load(Ordering::SeqCst), 2);
    assert_eq!(counts.error.load(Ordering::SeqCst), 1);
    assert_eq!(failed, 3);
}
