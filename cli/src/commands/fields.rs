use crate::cli::FieldsArgs;
use crate::error::{Error, Result};

pub fn run(args: FieldsArgs) -> Result<()> {
    let report = coh3_format::read_fields(&args.file).map_err(|source| Error::ReadFields {
        path: args.file.clone(),
        source,
    })?;
    print!("{report}");
    Ok(())
}
