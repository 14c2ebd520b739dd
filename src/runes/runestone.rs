use super::{flag::Flag, message::Message, tag::Tag, *};

#[derive(Default, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Runestone {
  pub edicts: Vec<Edict>,
  pub etching: Option<Etching>,
  pub mint: Option<RuneId>,
  pub pointer: Option<u32>,
}

#[derive(Debug, PartialEq)]
enum Payload {
  Valid(Vec<u8>),
  Invalid(Flaw),
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Encoded {
  pub script_pubkey: ScriptBuf,
  pub commitment: Option<Vec<u8>>,
}

const MAX_SCRIPT_SIZE: usize = 10_000;

impl Runestone {
  pub const MAGIC_NUMBER: opcodes::All = opcodes::all::OP_PUSHNUM_13;
  pub const COMMIT_CONFIRMATIONS: u16 = 6;

  pub fn decipher(transaction: &Transaction) -> Option<Artifact> {
    let payload = match Runestone::payload(transaction) {
      Some(Payload::Valid(payload)) => payload,
      Some(Payload::Invalid(flaw)) => {
        return Some(Artifact::Cenotaph(Cenotaph {
          flaws: [flaw].into(),
          ..default()
        }));
      }
      None => return None,
    };

    let Ok(integers) = Runestone::integers(&payload) else {
      return Some(Artifact::Cenotaph(Cenotaph {
        flaws: [Flaw::Varint].into(),
        ..default()
      }));
    };

    let Message {
      edicts,
      mut fields,
      mut flaws,
    } = Message::from_integers(transaction, &integers);

    let mut flags = Tag::Flags
      .take(&mut fields, |[flags]| Some(flags))
      .unwrap_or_default();

    let etching = Flag::Etching.take(&mut flags).then(|| Etching {
      divisibility: Tag::Divisibility.take(&mut fields, |[divisibility]| {
        let divisibility = u8::try_from(divisibility).ok()?;
        (divisibility <= Etching::MAX_DIVISIBILITY).then_some(divisibility)
      }),
      premine: Tag::Premine.take(&mut fields, |[premine]| Some(premine)),
      rune: Tag::Rune.take(&mut fields, |[rune]| Some(Rune(rune))),
      spacers: Tag::Spacers.take(&mut fields, |[spacers]| {
        let spacers = u32::try_from(spacers).ok()?;
        (spacers <= Etching::MAX_SPACERS).then_some(spacers)
      }),
      symbol: Tag::Symbol.take(&mut fields, |[symbol]| {
        char::from_u32(u32::try_from(symbol).ok()?)
      }),
      terms: Flag::Terms.take(&mut flags).then(|| Terms {
        amount: Tag::Amount.take(&mut fields, |[amount]| Some(amount)),
        cap: Tag::Cap.take(&mut fields, |[cap]| Some(cap)),
        height: (
          Tag::HeightStart.take(&mut fields, |[start]| u64::try_from(start).ok()),
          Tag::HeightEnd.take(&mut fields, |[end]| u64::try_from(end).ok()),
        ),
        offset: (
          Tag::OffsetStart.take(&mut fields, |[start]| u64::try_from(start).ok()),
          Tag::OffsetEnd.take(&mut fields, |[end]| u64::try_from(end).ok()),
        ),
      }),
      turbo: Flag::Turbo.take(&mut flags),
    });

    let mint = Tag::Mint.take(&mut fields, |[block, tx]| {
      RuneId::new(u64::try_from(block).ok()?, u32::try_from(tx).ok()?)
    });

    let pointer = Tag::Pointer.take(&mut fields, |[pointer]| u32::try_from(pointer).ok());

    if let Some(pointer) = pointer {
      if u64::from(pointer) >= u64::try_from(transaction.output.len()).unwrap() {
        flaws.insert(Flaw::EdictOutput);
      }
    }

    if etching
      .map(|etching| etching.supply().is_none())
      .unwrap_or_default()
    {
      flaws.insert(Flaw::SupplyOverflow);
    }

    if flags != 0 {
      flaws.insert(Flaw::UnrecognizedFlag);
    }

    if fields.keys().any(|tag| tag % 2 == 0) {
      flaws.insert(Flaw::UnrecognizedEvenTag);
    }

    if !flaws.is_empty() {
      return Some(Artifact::Cenotaph(Cenotaph {
        etching: etching.and_then(|etching| etching.rune),
        flaws,
        mint,
      }));
    }

    Some(Artifact::Runestone(Self {
      edicts,
      etching,
      mint,
      pointer,
    }))
  }

  pub fn encipher(&self) -> Result<Encoded, error::Encode> {
    let mut commitment = None;

    if let Some(etching) = self.etching {
      if let Some(divisibility) = etching.divisibility {
        if divisibility > Etching::MAX_DIVISIBILITY {
          return Err(error::Encode::Divisibility(divisibility));
        }
      }

      if let Some(spacers) = etching.spacers {
        if spacers > Etching::MAX_SPACERS {
          return Err(error::Encode::Spacers(spacers));
        }
      }

      if etching.supply().is_none() {
        return Err(error::Encode::SupplyOverflow);
      }

      commitment = etching.rune.map(Rune::commitment);
    }

    let mut payload = Vec::new();

    if let Some(etching) = self.etching {
      let mut flags = 0;
      Flag::Etching.set(&mut flags);

      if etching.terms.is_some() {
        Flag::Terms.set(&mut flags);
      }

      if etching.turbo {
        Flag::Turbo.set(&mut flags);
      }

      Tag::Flags.encode([flags], &mut payload);

      Tag::Divisibility.encode_option(etching.divisibility, &mut payload);
      Tag::Spacers.encode_option(etching.spacers, &mut payload);
      Tag::Rune.encode_option(etching.rune.map(|rune| rune.0), &mut payload);
      Tag::Symbol.encode_option(etching.symbol, &mut payload);
      Tag::Premine.encode_option(etching.premine, &mut payload);

      if let Some(terms) = etching.terms {
        Tag::Cap.encode_option(terms.cap, &mut payload);
        Tag::Amount.encode_option(terms.amount, &mut payload);
        Tag::HeightStart.encode_option(terms.height.0, &mut payload);
        Tag::HeightEnd.encode_option(terms.height.1, &mut payload);
        Tag::OffsetStart.encode_option(terms.offset.0, &mut payload);
        Tag::OffsetEnd.encode_option(terms.offset.1, &mut payload);
      }
    }

    if let Some(RuneId { block, tx }) = self.mint {
      Tag::Mint.encode([block.into(), tx.into()], &mut payload);
    }

    Tag::Pointer.encode_option(self.pointer, &mut payload);

    if !self.edicts.is_empty() {
      varint::encode_to_vec(Tag::Body.into(), &mut payload);

      let mut edicts = self.edicts.clone();
      edicts.sort_by_key(|edict| edict.id);

      let mut previous = RuneId::default();
      for edict in edicts {
        let (block, tx) = previous.delta(edict.id).unwrap();
        varint::encode_to_vec(block, &mut payload);
        varint::encode_to_vec(tx, &mut payload);
        varint::encode_to_vec(edict.amount, &mut payload);
        varint::encode_to_vec(edict.output.into(), &mut payload);
        previous = edict.id;
      }
    }

    let mut builder = script::Builder::new()
      .push_opcode(opcodes::all::OP_RETURN)
      .push_opcode(Runestone::MAGIC_NUMBER);

    for chunk in payload.chunks(MAX_SCRIPT_ELEMENT_SIZE) {
      let push: &script::PushBytes = chunk.try_into().unwrap();
      builder = builder.push_slice(push);
    }

    let script_pubkey = builder.into_script();

    if script_pubkey.len() > MAX_SCRIPT_SIZE {
      return Err(error::Encode::ScriptSize(script_pubkey.len()));
    }

    Ok(Encoded {
      script_pubkey,
      commitment,
    })
  }

  fn payload(transaction: &Transaction) -> Option<Payload> {
    // the runestone output is the first output whose script begins
    // OP_RETURN OP_13; a failure to parse it does not move the search on to
    // later candidates
    for output in &transaction.output {
      let mut instructions = output.script_pubkey.instructions();

      if instructions.next() != Some(Ok(Instruction::Op(opcodes::all::OP_RETURN))) {
        continue;
      }

      // errors are ignored here, since an OP_RETURN script holding something
      // other than the protocol identifier may be arbitrarily malformed
      if instructions.next() != Some(Ok(Instruction::Op(Runestone::MAGIC_NUMBER))) {
        continue;
      }

      let mut payload = Vec::new();

      for result in instructions {
        match result {
          Ok(Instruction::PushBytes(push)) => {
            payload.extend_from_slice(push.as_bytes());
          }
          Ok(Instruction::Op(_)) => {
            return Some(Payload::Invalid(Flaw::Opcode));
          }
          Err(_) => {
            return Some(Payload::Invalid(Flaw::InvalidScript));
          }
        }
      }

      return Some(Payload::Valid(payload));
    }

    None
  }

  fn integers(payload: &[u8]) -> Result<Vec<u128>, varint::Error> {
    let mut integers = Vec::new();
    let mut i = 0;

    while i < payload.len() {
      let (integer, length) = varint::decode(&payload[i..])?;
      integers.push(integer);
      i += length;
    }

    Ok(integers)
  }
}
