use crate::args::SplitArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::transfer::{self, TransferSplit};
use crate::Result;

/// Computes how an auto-transfer divides between allowance and investment.
pub fn split(args: SplitArgs) -> Result<Out<TransferSplit>> {
    let parts =
        transfer::split(args.amount(), args.investment_ratio()).pub_result(ErrorType::Request)?;
    Ok(Out::new(
        format!(
            "{} to allowance and {} to investment",
            parts.allowance, parts.investment
        ),
        parts,
    ))
}
