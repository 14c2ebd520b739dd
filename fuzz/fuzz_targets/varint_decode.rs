#![no_main]

use {libfuzzer_sys::fuzz_target, runix::varint};

fuzz_target!(|input: &[u8]| {
  if let Ok((decoded, length)) = varint::decode(input) {
    assert!(length <= input.len());

    // the canonical encoding is never longer than the decoded form
    assert!(varint::encode(decoded).len() <= length);
  }
});
