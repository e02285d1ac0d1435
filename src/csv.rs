use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::ledger::Account;
use crate::model::DEFAULT_OVERDRAFT_LIMIT;
use crate::{AccountId, Amount, Instruction};

/// Errors that can occur when parsing csv rows.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized instruction type '{kind}'")]
    UnrecognizedType { line: usize, kind: String },

    #[error("line {line}: {kind} missing {field}")]
    MissingField {
        line: usize,
        kind: String,
        field: &'static str,
    },

    #[error("line {line}: {kind} has negative amount {amount}")]
    NegativeAmount {
        line: usize,
        kind: String,
        amount: i64,
    },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    r#type: String,
    account: Option<AccountId>,
    to: Option<AccountId>,
    amount: Option<i64>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    account: AccountId,
    balance: i64,
    overdraft_limit: i64,
}

impl InputRow {
    fn into_instruction(self, line: usize) -> Result<Instruction, CsvError> {
        let kind = self.r#type.as_str();
        let missing = |field| CsvError::MissingField {
            line,
            kind: kind.to_string(),
            field,
        };

        match kind {
            "open" => Ok(Instruction::Open {
                account: self.account.ok_or_else(|| missing("account"))?,
                overdraft_limit: self.amount.map_or(DEFAULT_OVERDRAFT_LIMIT, Amount::new),
            }),
            "deposit" => Ok(Instruction::Deposit {
                account: self.account.ok_or_else(|| missing("account"))?,
                amount: self.amount(line)?,
            }),
            "withdraw" | "withdrawal" => Ok(Instruction::Withdraw {
                account: self.account.ok_or_else(|| missing("account"))?,
                amount: self.amount(line)?,
            }),
            "transfer" => Ok(Instruction::Transfer {
                from: self.account.ok_or_else(|| missing("account"))?,
                to: self.to.ok_or_else(|| missing("to"))?,
                amount: self.amount(line)?,
            }),
            "undo" => Ok(Instruction::Undo),
            other => Err(CsvError::UnrecognizedType {
                line,
                kind: other.to_string(),
            }),
        }
    }

    /// Non-negative command amount.
    fn amount(&self, line: usize) -> Result<Amount, CsvError> {
        match self.amount {
            None => Err(CsvError::MissingField {
                line,
                kind: self.r#type.clone(),
                field: "amount",
            }),
            Some(amount) if amount < 0 => Err(CsvError::NegativeAmount {
                line,
                kind: self.r#type.clone(),
                amount,
            }),
            Some(amount) => Ok(Amount::new(amount)),
        }
    }
}

/// Read instructions from a csv file.
pub fn read_instructions(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Instruction, CsvError>>, CsvError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|source| CsvError::Open {
            path: path.display().to_string(),
            source,
        })?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            row.into_instruction(line)
        }))
}

/// Write accounts in csv format.
pub fn write_accounts<'a, W: io::Write>(
    writer: W,
    accounts: impl IntoIterator<Item = &'a Account>,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for account in accounts {
        writer.serialize(OutputRow {
            account: account.id(),
            balance: account.balance().value(),
            overdraft_limit: account.overdraft_limit().value(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn read(content: &str) -> Vec<Result<Instruction, CsvError>> {
        let file = write_csv(content);
        read_instructions(file.path()).unwrap().collect()
    }

    #[test]
    fn read_every_instruction_type() {
        let results = read(
            "type,account,to,amount\n\
             open,1,,\n\
             open,2,,0\n\
             deposit,1,,100\n\
             withdraw,1,,30\n\
             transfer,1,2,50\n\
             undo,,,\n",
        );
        let instructions: Vec<_> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(
            instructions,
            vec![
                Instruction::Open {
                    account: 1,
                    overdraft_limit: DEFAULT_OVERDRAFT_LIMIT
                },
                Instruction::Open {
                    account: 2,
                    overdraft_limit: Amount::ZERO
                },
                Instruction::Deposit {
                    account: 1,
                    amount: Amount::new(100)
                },
                Instruction::Withdraw {
                    account: 1,
                    amount: Amount::new(30)
                },
                Instruction::Transfer {
                    from: 1,
                    to: 2,
                    amount: Amount::new(50)
                },
                Instruction::Undo,
            ]
        );
    }

    #[test]
    fn read_with_whitespace() {
        let results = read("type, account, to, amount\ndeposit, 1, , 10\n");
        assert_eq!(results.len(), 1);
        assert!(results[0].is_ok());
    }

    #[test]
    fn read_returns_error_for_unknown_type() {
        let results = read("type,account,to,amount\nrefund,1,,10\n");
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::UnrecognizedType { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_missing_fields() {
        let results = read(
            "type,account,to,amount\n\
             deposit,1,,\n\
             transfer,1,,5\n\
             withdraw,,,5\n",
        );
        assert!(matches!(
            results[0].as_ref().unwrap_err(),
            CsvError::MissingField {
                line: 2,
                field: "amount",
                ..
            }
        ));
        assert!(matches!(
            results[1].as_ref().unwrap_err(),
            CsvError::MissingField {
                line: 3,
                field: "to",
                ..
            }
        ));
        assert!(matches!(
            results[2].as_ref().unwrap_err(),
            CsvError::MissingField {
                line: 4,
                field: "account",
                ..
            }
        ));
    }

    #[test]
    fn read_returns_error_for_negative_amount() {
        let results = read("type,account,to,amount\ndeposit,1,,-5\n");
        assert!(matches!(
            results[0].as_ref().unwrap_err(),
            CsvError::NegativeAmount {
                line: 2,
                amount: -5,
                ..
            }
        ));
    }

    #[test]
    fn read_largest_amount() {
        let results = read(
            "type,account,to,amount\n\
             deposit,1,,9223372036854775807\n\
             deposit,1,,9223372036854775807\n",
        );
        assert_eq!(results.len(), 2);
        for result in results {
            assert_eq!(
                result.unwrap(),
                Instruction::Deposit {
                    account: 1,
                    amount: Amount::new(i64::MAX)
                }
            );
        }
    }

    #[test]
    fn read_returns_error_for_bad_number() {
        let results = read("type,account,to,amount\ndeposit,1,,ten\n");
        assert!(matches!(
            results[0].as_ref().unwrap_err(),
            CsvError::Parse { line: 2, .. }
        ));
    }

    #[test]
    fn read_missing_file_fails() {
        assert!(matches!(
            read_instructions("/nonexistent/instructions.csv"),
            Err(CsvError::Open { .. })
        ));
    }

    #[test]
    fn write_accounts_in_order() {
        let mut ledger = Ledger::new();
        ledger.open(2, Amount::ZERO).unwrap();
        ledger.open(1, DEFAULT_OVERDRAFT_LIMIT).unwrap();
        ledger.withdraw(1, Amount::new(25)).unwrap();

        let mut out = Vec::new();
        write_accounts(&mut out, ledger.accounts()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "account,balance,overdraft_limit\n1,-25,-500\n2,0,0\n"
        );
    }
}
