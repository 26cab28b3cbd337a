// SPDX-License-Identifier: Apache-2.0
//! Filesystem round-trips for the braid message codec.

use braid_codec::{read_binary, write_binary, CodecError};
use braid_graph::{make_argument, make_message_argument, NetDef, OpDef};

fn sample_net() -> NetDef {
    let inner = OpDef {
        op_type: "Relu".into(),
        inputs: vec!["conv_out".into()],
        outputs: vec!["act".into()],
        args: vec![],
    };
    NetDef {
        name: "test_net".into(),
        ops: vec![
            OpDef {
                op_type: "Conv".into(),
                inputs: vec!["data".into(), "w".into()],
                outputs: vec!["conv_out".into()],
                args: vec![
                    make_argument("kernel", 3_i64),
                    make_argument("scale", 0.5_f32),
                    make_argument("order", "NCHW"),
                    make_argument("pads", vec![1_i64, 1, 1, 1]),
                    make_message_argument("fused", &inner).unwrap(),
                ],
            },
            inner,
        ],
        external_inputs: vec!["data".into(), "w".into()],
        external_outputs: vec!["act".into()],
    }
}

#[test]
fn binary_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("net.bnet");
    let net = sample_net();
    write_binary(&net, &path).unwrap();
    let decoded: NetDef = read_binary(&path).unwrap();
    assert_eq!(decoded, net);
}

#[test]
fn binary_read_missing_path_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_binary::<NetDef, _>(dir.path().join("absent.bnet")).unwrap_err();
    assert!(matches!(err, CodecError::NotFound(_)));
}

#[test]
fn binary_read_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.bnet");
    std::fs::write(&path, b"not a message").unwrap();
    let err = read_binary::<NetDef, _>(&path).unwrap_err();
    assert!(matches!(err, CodecError::Parse(_)));
}

#[test]
fn binary_read_rejects_oversized_length_prefix() {
    // A byte-string header declaring 2 GiB followed by almost nothing.
    // The decode must fail quickly instead of trusting the length.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.bnet");
    let mut bytes = vec![0x5b];
    bytes.extend_from_slice(&(2u64 << 30).to_be_bytes());
    bytes.extend_from_slice(&[0u8; 16]);
    std::fs::write(&path, &bytes).unwrap();
    let err = read_binary::<Vec<u8>, _>(&path).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Parse(_) | CodecError::TooLarge { .. }
    ));
}

#[test]
fn binary_write_truncates_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("net.bnet");
    write_binary(&sample_net(), &path).unwrap();
    let small = NetDef {
        name: "tiny".into(),
        ..NetDef::default()
    };
    write_binary(&small, &path).unwrap();
    let decoded: NetDef = read_binary(&path).unwrap();
    assert_eq!(decoded, small);
}

#[test]
fn binary_write_into_missing_directory_is_create_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("net.bnet");
    let err = write_binary(&sample_net(), &path).unwrap_err();
    assert!(matches!(err, CodecError::Create { .. }));
}

#[cfg(unix)]
#[test]
fn binary_write_sets_owner_rw_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("net.bnet");
    write_binary(&sample_net(), &path).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    // Owner read-write, no execute anywhere; group/other bits are
    // subject to the process umask.
    assert_eq!(mode & 0o700, 0o600);
    assert_eq!(mode & 0o111, 0);
}

#[cfg(feature = "text")]
mod text {
    use super::sample_net;
    use braid_codec::{read_text, write_text, CodecError};
    use braid_graph::NetDef;

    #[test]
    fn text_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        let net = sample_net();
        write_text(&net, &path).unwrap();
        let decoded: NetDef = read_text(&path).unwrap();
        assert_eq!(decoded, net);
    }

    #[test]
    fn text_rendering_is_human_editable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        write_text(&sample_net(), &path).unwrap();
        let rendered = std::fs::read_to_string(&path).unwrap();
        assert!(rendered.contains("\"op_type\": \"Conv\""));
        // Hand-edit the file and read it back.
        let edited = rendered.replace("test_net", "edited_net");
        std::fs::write(&path, edited).unwrap();
        let decoded: NetDef = read_text(&path).unwrap();
        assert_eq!(decoded.name, "edited_net");
    }

    #[test]
    fn text_read_missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text::<NetDef, _>(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CodecError::NotFound(_)));
    }

    #[test]
    fn text_read_rejects_malformed_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ \"name\": ").unwrap();
        let err = read_text::<NetDef, _>(&path).unwrap_err();
        assert!(matches!(err, CodecError::Parse(_)));
    }
}
