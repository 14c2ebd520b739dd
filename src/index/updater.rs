use super::*;

pub(super) struct RuneUpdater<'a, S: Storage, C: RpcClient> {
  pub(super) burned: HashMap<RuneId, Lot>,
  pub(super) client: &'a C,
  pub(super) height: u64,
  pub(super) minimum: Rune,
  pub(super) storage: &'a mut S,
}

impl<S: Storage, C: RpcClient> RuneUpdater<'_, S, C> {
  pub(super) fn index_runes(&mut self, tx_index: u32, tx: &Transaction, txid: Txid) -> Result {
    let artifact = Runestone::decipher(tx);

    let mut unallocated = self.unallocated(tx)?;

    let mut allocated: Vec<HashMap<RuneId, Lot>> = vec![HashMap::new(); tx.output.len()];

    if let Some(artifact) = &artifact {
      if let Some(id) = artifact.mint() {
        if let Some(amount) = self.mint(id)? {
          // a cenotaph mint uses up one of the cap's slots but pays nothing
          if let Artifact::Runestone(_) = artifact {
            *unallocated.entry(id).or_default() += amount;
          }
        }
      }

      let etched = self.etched(tx_index, tx, artifact)?;

      if let Artifact::Runestone(runestone) = artifact {
        if let Some((id, ..)) = etched {
          *unallocated.entry(id).or_default() +=
            runestone.etching.unwrap().premine.unwrap_or_default();
        }

        for Edict { id, amount, output } in runestone.edicts.iter().copied() {
          let amount = Lot(amount);

          // the edict parser rejects outputs past the output count
          let output = usize::try_from(output).unwrap();
          assert!(output <= tx.output.len());

          let id = if id == RuneId::default() {
            let Some((id, ..)) = etched else {
              continue;
            };

            id
          } else {
            id
          };

          let Some(balance) = unallocated.get_mut(&id) else {
            continue;
          };

          let mut allocate = |balance: &mut Lot, amount: Lot, output: usize| {
            if amount > 0 {
              *balance -= amount;
              *allocated[output].entry(id).or_default() += amount;
            }
          };

          if output == tx.output.len() {
            let destinations = tx
              .output
              .iter()
              .enumerate()
              .filter_map(|(output, tx_out)| {
                (!tx_out.script_pubkey.is_op_return()).then_some(output)
              })
              .collect::<Vec<usize>>();

            if !destinations.is_empty() {
              let count = u128::try_from(destinations.len()).unwrap();

              let total = if amount == 0 {
                *balance
              } else {
                amount.min(*balance)
              };

              let share = total / count;
              let remainder = usize::try_from(total % count).unwrap();

              for (i, output) in destinations.iter().enumerate() {
                allocate(
                  balance,
                  if i < remainder { share + 1 } else { share },
                  *output,
                );
              }
            }
          } else {
            let amount = if amount == 0 {
              *balance
            } else {
              amount.min(*balance)
            };

            allocate(balance, amount, output);
          }
        }

        if let Some((id, rune)) = etched {
          self.create_rune_entry(txid, runestone.etching.unwrap(), id, rune)?;
        }
      }
    }

    let mut burned: HashMap<RuneId, Lot> = HashMap::new();

    if let Some(Artifact::Cenotaph(_)) = artifact {
      for (id, balance) in unallocated {
        *burned.entry(id).or_default() += balance;
      }
    } else {
      let pointer = artifact
        .map(|artifact| match artifact {
          Artifact::Runestone(runestone) => runestone.pointer,
          Artifact::Cenotaph(_) => unreachable!(),
        })
        .unwrap_or_default();

      // assign all unallocated runes to the default output, or the first
      // non-OP_RETURN output if there is no default
      if let Some(vout) = pointer
        .map(|pointer| usize::try_from(pointer).unwrap())
        .inspect(|&pointer| assert!(pointer < allocated.len()))
        .or_else(|| {
          tx.output
            .iter()
            .enumerate()
            .find(|(_vout, tx_out)| !tx_out.script_pubkey.is_op_return())
            .map(|(vout, _tx_out)| vout)
        })
      {
        for (id, balance) in unallocated {
          if balance > 0 {
            *allocated[vout].entry(id).or_default() += balance;
          }
        }
      } else {
        for (id, balance) in unallocated {
          if balance > 0 {
            *burned.entry(id).or_default() += balance;
          }
        }
      }
    }

    // write the per-output balance lists
    for (vout, balances) in allocated.into_iter().enumerate() {
      if balances.is_empty() {
        continue;
      }

      // anything assigned to an OP_RETURN output burns
      if tx.output[vout].script_pubkey.is_op_return() {
        for (id, balance) in &balances {
          *burned.entry(*id).or_default() += *balance;
        }
        continue;
      }

      let mut balances = balances
        .into_iter()
        .map(|(id, balance)| (id, balance.n()))
        .collect::<Vec<(RuneId, u128)>>();

      // sort balances by id so tests can assert them in a fixed order
      balances.sort();

      self.storage.set_balances(
        OutPoint {
          txid,
          vout: vout.try_into().unwrap(),
        },
        &balances,
      )?;
    }

    for (id, amount) in burned {
      *self.burned.entry(id).or_default() += amount;
    }

    Ok(())
  }

  pub(super) fn update(self) -> Result {
    for (id, burned) in self.burned {
      self.storage.add_burned(id, burned.n())?;
    }

    Ok(())
  }

  fn create_rune_entry(&mut self, txid: Txid, etching: Etching, id: RuneId, rune: Rune) -> Result {
    let Etching {
      divisibility,
      premine,
      spacers,
      symbol,
      terms,
      turbo,
      ..
    } = etching;

    self.storage.set_rune_entry(
      id,
      RuneEntry {
        block: id.block,
        burned: 0,
        divisibility: divisibility.unwrap_or_default(),
        etching: txid,
        mints: 0,
        premine: premine.unwrap_or_default(),
        spaced_rune: SpacedRune {
          rune,
          spacers: spacers.unwrap_or_default(),
        },
        symbol,
        terms,
        turbo,
      },
    )?;

    Ok(())
  }

  fn etched(
    &mut self,
    tx_index: u32,
    tx: &Transaction,
    artifact: &Artifact,
  ) -> Result<Option<(RuneId, Rune)>> {
    let rune = match artifact {
      Artifact::Runestone(runestone) => match runestone.etching {
        Some(etching) => etching.rune,
        None => return Ok(None),
      },
      // a cenotaph's etched name is preserved for reporting but never takes
      // effect
      Artifact::Cenotaph(_) => return Ok(None),
    };

    let rune = if let Some(rune) = rune {
      if rune < self.minimum
        || rune.is_reserved()
        || self.storage.rune_id(rune)?.is_some()
        || !self.tx_commits_to_rune(tx, rune)?
      {
        return Ok(None);
      }
      rune
    } else {
      Rune::reserved(self.height, tx_index)
    };

    Ok(Some((
      RuneId {
        block: self.height,
        tx: tx_index,
      },
      rune,
    )))
  }

  fn mint(&mut self, id: RuneId) -> Result<Option<Lot>> {
    let Some(entry) = self.storage.rune_entry(id)? else {
      return Ok(None);
    };

    let Ok(amount) = entry.mintable(self.height) else {
      return Ok(None);
    };

    self.storage.increment_mints(id)?;

    Ok(Some(Lot(amount)))
  }

  fn tx_commits_to_rune(&self, tx: &Transaction, rune: Rune) -> Result<bool> {
    let commitment = rune.commitment();

    for input in &tx.input {
      // extracting a tapscript does not prove the input spends a taproot
      // output, so that is checked against the prev output below
      let Some(tapscript) = input.witness.tapscript() else {
        continue;
      };

      for instruction in tapscript.instructions() {
        // the extracted script may not parse
        let Ok(instruction) = instruction else {
          break;
        };

        let Some(pushbytes) = instruction.push_bytes() else {
          continue;
        };

        if pushbytes.as_bytes() != commitment {
          continue;
        }

        let Some(info) = self.client.transaction_info(&input.previous_output.txid)? else {
          bail!(
            "can't get input transaction: {}",
            input.previous_output.txid
          );
        };

        let taproot = info.transaction.output
          [usize::try_from(input.previous_output.vout).unwrap()]
        .script_pubkey
        .is_v1_p2tr();

        if !taproot {
          continue;
        }

        let Some(commit_height) = info.height else {
          continue;
        };

        let confirmations = self
          .height
          .checked_sub(commit_height)
          .context("commit transaction above etching height")?
          + 1;

        if confirmations >= Runestone::COMMIT_CONFIRMATIONS.into() {
          return Ok(true);
        }
      }
    }

    Ok(false)
  }

  fn unallocated(&mut self, tx: &Transaction) -> Result<HashMap<RuneId, Lot>> {
    let mut unallocated: HashMap<RuneId, Lot> = HashMap::new();

    for input in &tx.input {
      if let Some(balances) = self.storage.take_balances(input.previous_output)? {
        for (id, balance) in balances {
          *unallocated.entry(id).or_default() += balance;
        }
      }
    }

    Ok(unallocated)
  }
}
