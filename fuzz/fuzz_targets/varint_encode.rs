#![no_main]

use {libfuzzer_sys::fuzz_target, runix::varint};

fuzz_target!(|input: u128| {
  let encoded = varint::encode(input);
  let (decoded, length) = varint::decode(&encoded).unwrap();
  assert_eq!(decoded, input);
  assert_eq!(length, encoded.len());
});
