use c2format::{format, CodepageCharset, ErrorKind, Packer, Value};
use quickcheck_macros::quickcheck;
use rstest::*;

fn record(name: &str, width: usize, words: &[i16]) -> Vec<u8> {
    let mut out = name.as_bytes().to_vec();
    out.resize(width, b' ');
    for x in words {
        out.extend_from_slice(&x.to_le_bytes());
    }
    out
}

#[test]
fn beamspec_laser() {
    let mut data = record("Laser", 20, &[1, 1, 0, 0, 1, 1, 10, 3]);
    data.extend(record("X-Ray Laser", 20, &[2, 1, 0, 0, 1, 1, 15, 1]));
    data.extend(record("Plasma Bolt", 20, &[5, 1, 2, 0, 2, 2, 3, 10]));

    let value = format::unpack("beamspec", &data, None, None).unwrap();
    let beams = value.as_array().unwrap();
    assert_eq!(beams.len(), 3);

    let laser = &beams[0];
    assert_eq!(laser.get("NAME"), Some(&Value::from("Laser")));
    assert_eq!(laser.get("MASS"), Some(&Value::Integer(1)));
    assert_eq!(laser.get("TECH"), Some(&Value::Integer(1)));
    assert_eq!(laser.get("KILL"), Some(&Value::Integer(10)));
    assert_eq!(laser.get("DAMAGE"), Some(&Value::Integer(3)));

    let cost = laser.get("COST").unwrap();
    assert_eq!(cost.get("MC"), Some(&Value::Integer(1)));
    assert_eq!(cost.get("T"), Some(&Value::Integer(1)));
    assert_eq!(cost.get("D"), Some(&Value::Integer(0)));
    assert_eq!(cost.get("M"), Some(&Value::Integer(0)));

    assert_eq!(beams[2].get("NAME"), Some(&Value::from("Plasma Bolt")));
    assert_eq!(format::pack("beamspec", &value, None, None).unwrap(), data);
}

#[test]
fn torpspec_is_capped() {
    let data = vec![b' '; 10_000];
    let value = format::unpack("torpspec", &data, None, None).unwrap();
    let torps = value.as_array().unwrap();
    assert_eq!(torps.len(), 10);

    for torp in torps {
        assert_eq!(torp.get("NAME"), Some(&Value::from("")));
        assert_eq!(torp.get("TORPCOST"), Some(&Value::Integer(0x2020)));
        assert_eq!(
            torp.get("TUBECOST").and_then(|x| x.get("MC")),
            Some(&Value::Integer(0x2020))
        );
    }

    let packed = format::pack("torpspec", &value, None, None).unwrap();
    assert_eq!(packed, vec![b' '; 380]);
}

#[test]
fn engspec_fuel_factors() {
    let mut data = record("StarDrive 1", 20, &[1, 5, 1, 0, 1]);
    for warp in 1..=9i32 {
        data.extend_from_slice(&(warp * warp * 100).to_le_bytes());
    }
    assert_eq!(data.len(), 66);

    let value = format::unpack("engspec", &data, None, None).unwrap();
    let engine = value.get_index(0).unwrap();
    assert_eq!(engine.get("TECH"), Some(&Value::Integer(1)));

    let fuel = engine.get("FUELFACTOR").and_then(Value::as_array).unwrap();
    assert_eq!(fuel.len(), 9);
    assert_eq!(fuel[8], Value::Integer(8100));

    assert_eq!(format::pack("engspec", &value, None, None).unwrap(), data);
}

#[test]
fn hullspec_split_cost() {
    let words = [12, 1, 8, 5, 7, 260, 180, 2, 65, 3, 50, 0, 2, 3, 50];
    let data = record("NOCTURNE CLASS DESTROYER", 30, &words);
    assert_eq!(data.len(), 60);

    let value = format::unpack("hullspec", &data, None, None).unwrap();
    let hull = value.get_index(0).unwrap();
    assert_eq!(hull.get("NAME"), Some(&Value::from("NOCTURNE CLASS DESTROYER")));
    assert_eq!(hull.get("LAUNCHERS"), Some(&Value::Integer(2)));
    assert_eq!(hull.get("BEAMS"), Some(&Value::Integer(3)));

    let cost = hull.get("COST").unwrap();
    assert_eq!(cost.get("T"), Some(&Value::Integer(8)));
    assert_eq!(cost.get("MC"), Some(&Value::Integer(50)));

    assert_eq!(format::pack("hullspec", &value, None, None).unwrap(), data);
}

#[test]
fn pack_defaults_missing_fields() {
    let mut beam = Value::new_map();
    beam.insert("NAME", "Disruptor");
    beam.insert("UNKNOWN", 99);

    let data = format::pack("beamspec", &Value::from(vec![beam]), None, None).unwrap();
    assert_eq!(data, record("Disruptor", 20, &[0; 8]));
}

#[test]
fn pack_writes_every_record() {
    let beams = vec![Value::new_map(); 12];
    let data = format::pack("beamspec", &Value::from(beams), None, None).unwrap();
    assert_eq!(data.len(), 12 * 36);

    // Unpacking only reads the ten beam slots
    let value = format::unpack("beamspec", &data, None, None).unwrap();
    assert_eq!(value.as_array().map(|x| x.len()), Some(10));
}

#[test]
fn truehull_short_buffer() {
    let value = format::unpack("truehull", &[7, 0, 8, 0], None, None).unwrap();
    let players = value.as_array().unwrap();
    assert_eq!(players.len(), 11);
    assert!(players.iter().all(|row| {
        row.as_array()
            .map_or(false, |x| x.len() == 20 && x.iter().all(|h| h == &Value::Integer(0)))
    }));

    assert_eq!(format::pack("truehull", &value, None, None).unwrap(), vec![0; 440]);
}

#[test]
fn truehull_round_trip() {
    let data: Vec<u8> = (0..220i16).flat_map(|x| x.to_le_bytes()).collect();
    let value = format::unpack("truehull", &data, None, None).unwrap();
    let hull = value.get_index(1).and_then(|x| x.get_index(2));
    assert_eq!(hull, Some(&Value::Integer(22)));
    assert_eq!(format::pack("truehull", &value, None, None).unwrap(), data);
}

#[rstest]
#[case(None, vec![0xf2])]
#[case(Some("cp437"), vec![0xf2])]
#[case(Some("utf8"), "\u{2265}".as_bytes().to_vec())]
#[case(Some("latin1"), vec![b'?'])]
#[case(Some("windows-1252"), vec![b'?'])]
fn charset_selection(#[case] charset: Option<&str>, #[case] expected: Vec<u8>) {
    let text = Value::from("\u{2265}");
    let data = format::pack("string", &text, None, charset).unwrap();
    assert_eq!(data, expected);
}

#[test]
fn cp437_decodes_greater_equal() {
    let value = format::unpack("string", &[0xf2], None, None).unwrap();
    assert_eq!(value, Value::from("\u{2265}"));
}

#[rstest]
#[case("sim")]
#[case("beamspec")]
#[case("torpspec")]
#[case("engspec")]
#[case("hullspec")]
#[case("truehull")]
#[case("string")]
fn unknown_options(#[case] file_type: &str) {
    let err = format::unpack(file_type, b"", Some("yaml"), None).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidDataType(_)));

    let err = format::unpack(file_type, b"", None, Some("ebcdic")).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidCharset(_)));
}

#[test]
fn unknown_file_type() {
    let err = format::unpack("xyplan", b"", None, None).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidFileType(ref x) if x == "xyplan"));
    assert!(err.to_string().contains("xyplan"));
}

#[cfg(feature = "json")]
#[test]
fn json_wrapping() {
    let data = record("Laser", 20, &[1, 1, 0, 0, 1, 1, 10, 3]);
    let json = format::unpack("beamspec", &data, Some("json"), None).unwrap();
    let text = json.as_text().unwrap();

    let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(parsed[0]["NAME"], "Laser");
    assert_eq!(parsed[0]["COST"]["MC"], 1);

    let repacked = format::pack("beamspec", &json, Some("json"), None).unwrap();
    assert_eq!(repacked, data);
}

#[cfg(feature = "json")]
#[test]
fn json_with_unicode_names() {
    let json = Value::from(r#"[{"NAME":"≥ Ray","KILL":4}]"#);
    let data = format::pack("beamspec", &json, Some("json"), Some("cp437")).unwrap();
    assert_eq!(&data[..6], b"\xf2 Ray ");
    assert_eq!(&data[32..34], &[4, 0]);
}

#[quickcheck]
fn fixed_records_repack(data: Vec<u8>) -> bool {
    let latin1 = CodepageCharset::latin1();
    [
        (format::FileType::BeamSpec, 36usize, 10usize),
        (format::FileType::TorpSpec, 38, 10),
        (format::FileType::EngSpec, 66, 9),
        (format::FileType::HullSpec, 60, 105),
    ]
    .iter()
    .all(|(file_type, width, max)| {
        let packer = file_type.packer();
        let value = packer.unpack(&data, &latin1).unwrap();
        let used = (data.len() / width).min(*max) * width;
        packer.pack(&value, &latin1).unwrap() == data[..used]
    })
}

#[quickcheck]
fn unpack_never_panics(data: Vec<u8>) -> bool {
    for file_type in ["sim", "string", "truehull"] {
        let _ = format::unpack(file_type, &data, None, None);
    }
    true
}
