//! Account structures and deserialization for the candy machine program.
//!
//! The candy machine is an Anchor account, Borsh-encoded after the 8-byte
//! discriminator. `Option` and `String` fields make the layout variable
//! length, so decoding walks a cursor instead of fixed offsets.

use solana_pubkey::Pubkey;

use crate::error::{SdkError, SdkResult};
use crate::program::constants::{CANDY_MACHINE_DISCRIMINATOR, CANDY_MACHINE_MIN_SIZE};

/// Sequential little-endian reader over account data.
struct AccountReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> AccountReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, len: usize) -> SdkResult<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or_else(|| SdkError::InvalidAccountData("length overflow".to_string()))?;
        if end > self.data.len() {
            return Err(SdkError::InvalidDataLength {
                expected: end,
                actual: self.data.len(),
            });
        }
        let slice = &self.data[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn read_bytes<const N: usize>(&mut self) -> SdkResult<[u8; N]> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }

    fn read_u8(&mut self) -> SdkResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> SdkResult<u32> {
        Ok(u32::from_le_bytes(self.read_bytes::<4>()?))
    }

    fn read_u64(&mut self) -> SdkResult<u64> {
        Ok(u64::from_le_bytes(self.read_bytes::<8>()?))
    }

    fn read_i64(&mut self) -> SdkResult<i64> {
        Ok(i64::from_le_bytes(self.read_bytes::<8>()?))
    }

    fn read_pubkey(&mut self) -> SdkResult<Pubkey> {
        Ok(Pubkey::new_from_array(self.read_bytes::<32>()?))
    }

    /// Borsh `Option<T>`: one tag byte, then the value if the tag is 1.
    fn read_option<T>(&mut self, read: impl FnOnce(&mut Self) -> SdkResult<T>) -> SdkResult<Option<T>> {
        match self.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(read(self)?)),
            tag => Err(SdkError::InvalidAccountData(format!(
                "invalid option tag {} at offset {}",
                tag,
                self.offset - 1
            ))),
        }
    }

    /// Borsh `String`: u32 length prefix, then UTF-8 bytes.
    fn read_string(&mut self) -> SdkResult<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| SdkError::InvalidAccountData(format!("invalid utf-8 string: {}", e)))
    }
}

// ============================================================================
// Candy Machine Account
// ============================================================================

/// Sale parameters stored inside the candy machine account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandyMachineData {
    /// Six-character identifier
    pub uuid: String,
    /// Price per mint, in lamports (or token base units if `token_mint` is set)
    pub price: u64,
    /// Total items this machine can mint
    pub items_available: u64,
    /// Unix timestamp (seconds) after which public minting is allowed
    pub go_live_date: Option<i64>,
}

/// Candy machine account.
///
/// Layout:
/// - [0..8]   discriminator (8 bytes)
/// - authority (32 bytes)
/// - wallet (32 bytes): treasury receiving mint payments
/// - token_mint (`Option<Pubkey>`: 1 or 33 bytes)
/// - config (32 bytes)
/// - data (`CandyMachineData`, variable)
/// - items_redeemed (8 bytes)
/// - bump (1 byte)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandyMachine {
    /// Account discriminator
    pub discriminator: [u8; 8],
    /// Authority that can update the machine
    pub authority: Pubkey,
    /// Treasury account
    pub wallet: Pubkey,
    /// SPL mint used for payment, if not SOL
    pub token_mint: Option<Pubkey>,
    /// Config account holding the item lines
    pub config: Pubkey,
    /// Sale parameters
    pub data: CandyMachineData,
    /// Number of items minted so far
    pub items_redeemed: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl CandyMachine {
    /// Minimum account size in bytes
    pub const MIN_LEN: usize = CANDY_MACHINE_MIN_SIZE;

    /// Deserialize from account data
    pub fn deserialize(data: &[u8]) -> SdkResult<Self> {
        if data.len() < Self::MIN_LEN {
            return Err(SdkError::InvalidDataLength {
                expected: Self::MIN_LEN,
                actual: data.len(),
            });
        }

        let mut reader = AccountReader::new(data);

        let discriminator = reader.read_bytes::<8>()?;
        if discriminator != CANDY_MACHINE_DISCRIMINATOR {
            return Err(SdkError::InvalidDiscriminator {
                expected: hex::encode(CANDY_MACHINE_DISCRIMINATOR),
                actual: hex::encode(discriminator),
            });
        }

        let authority = reader.read_pubkey()?;
        let wallet = reader.read_pubkey()?;
        let token_mint = reader.read_option(|r| r.read_pubkey())?;
        let config = reader.read_pubkey()?;
        let data = CandyMachineData {
            uuid: reader.read_string()?,
            price: reader.read_u64()?,
            items_available: reader.read_u64()?,
            go_live_date: reader.read_option(|r| r.read_i64())?,
        };
        let items_redeemed = reader.read_u64()?;
        let bump = reader.read_u8()?;

        Ok(Self {
            discriminator,
            authority,
            wallet,
            token_mint,
            config,
            data,
            items_redeemed,
            bump,
        })
    }

    /// Check if account data has the candy machine discriminator
    pub fn is_candy_machine_account(data: &[u8]) -> bool {
        data.len() >= 8 && data[0..8] == CANDY_MACHINE_DISCRIMINATOR
    }

    /// Serialize into the on-chain layout.
    ///
    /// The program owns the real account; this is used to seed fixtures and
    /// local validators.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::MIN_LEN + 33 + 8 + self.data.uuid.len());
        out.extend_from_slice(&self.discriminator);
        out.extend_from_slice(self.authority.as_ref());
        out.extend_from_slice(self.wallet.as_ref());
        match &self.token_mint {
            Some(mint) => {
                out.push(1);
                out.extend_from_slice(mint.as_ref());
            }
            None => out.push(0),
        }
        out.extend_from_slice(self.config.as_ref());
        out.extend_from_slice(&(self.data.uuid.len() as u32).to_le_bytes());
        out.extend_from_slice(self.data.uuid.as_bytes());
        out.extend_from_slice(&self.data.price.to_le_bytes());
        out.extend_from_slice(&self.data.items_available.to_le_bytes());
        match self.data.go_live_date {
            Some(ts) => {
                out.push(1);
                out.extend_from_slice(&ts.to_le_bytes());
            }
            None => out.push(0),
        }
        out.extend_from_slice(&self.items_redeemed.to_le_bytes());
        out.push(self.bump);
        out
    }
}
