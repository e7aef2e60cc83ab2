/*!

Binary codecs for [VGA Planets](https://en.wikipedia.org/wiki/VGA_Planets) game
data files.

Each supported file format has a [`Packer`] that converts the file's bytes into
a [`Value`] tree and back. The conversion is exact: unpacking a well formed
file and packing the result reproduces the file byte for byte.

## Features

- ✔ Specification files: `ENGSPEC.DAT`, `BEAMSPEC.DAT`, `TORPSPEC.DAT`, `HULLSPEC.DAT`
- ✔ Hull assignments: `TRUEHULL.DAT`
- ✔ Battle simulations: all six generations of the `.ccb` format
- ✔ Character sets: code page 437, Windows-1252, Latin-1, UTF-8
- ✔ JSON: optionally exchange the tree as JSON text (`json` feature, on by default)
- ✔ Command line converter (`cli` feature)

## Quick Start

The [`format`] module selects everything by name, the way a network service
receives its requests:

```rust
use c2format::{format, Value};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let mut data = b"Laser               ".to_vec();
data.extend_from_slice(&[1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 10, 0, 3, 0]);

let beams = format::unpack("beamspec", &data, None, None)?;
let laser = beams.get_index(0).unwrap();
assert_eq!(laser.get("NAME"), Some(&Value::from("Laser")));
assert_eq!(laser.get("COST").and_then(|x| x.get("MC")), Some(&Value::Integer(1)));

#[cfg(feature = "json")]
{
    let json = format::unpack("beamspec", &data, Some("json"), None)?;
    assert_eq!(format::pack("beamspec", &json, Some("json"), None)?, data);
}
# Ok(())
# }
```

## One Level Lower

The packers and character sets can be used directly when the options are
known ahead of time:

```rust
use c2format::{CodepageCharset, Packer, TruehullPacker, NUM_PLAYERS};

let table = TruehullPacker.unpack(&[0u8; 440], &CodepageCharset::cp437()).unwrap();
assert_eq!(table.as_array().map(|x| x.len()), Some(NUM_PLAYERS));
```

## Errors

Unpacking fails on data that is structurally invalid (see
[`Error::is_malformed`]). Packing does not fail on incomplete or excess
data: missing fields are written as zero or blank text and unknown fields
are ignored.

*/

mod charset;
mod data;
mod errors;
pub mod format;
mod packer;
pub mod sim;
pub(crate) mod util;
mod value;

pub use self::charset::*;
pub use self::errors::*;
pub use self::packer::*;
pub use self::sim::{FormatVersion, SimFile, SimPacker};
pub use self::value::Value;
