#![no_main]
use c2format::{format::FileType, CodepageCharset, Packer, SimFile};
use libfuzzer_sys::fuzz_target;

const FILE_TYPES: [FileType; 7] = [
    FileType::String,
    FileType::EngSpec,
    FileType::TorpSpec,
    FileType::BeamSpec,
    FileType::HullSpec,
    FileType::Truehull,
    FileType::Sim,
];

fuzz_target!(|data: &[u8]| {
    let cp437 = CodepageCharset::cp437();
    for file_type in FILE_TYPES {
        let packer = file_type.packer();
        let Ok(value) = packer.unpack(data, &cp437) else {
            continue;
        };

        // Whatever unpacks must pack and unpack to the same value again
        let packed = packer.pack(&value, &cp437).unwrap();
        let reparsed = packer.unpack(&packed, &cp437).unwrap();
        assert_eq!(value, reparsed, "{:?}", file_type);
    }

    // A simulation value converts to the file it came from, and writing
    // that file reproduces the bytes it was read from
    if let Ok(file) = SimFile::parse(data, &cp437) {
        assert_eq!(SimFile::from_value(&file.to_value()), file);

        let written = file.write(&cp437);
        assert_eq!(written.as_slice(), &data[..written.len()]);
    }
});
