use crate::cmd::{open, AxisArgs, ConnectionArgs};
use crate::exit::{driver_error, CliResult, SUCCESS};
use crate::output::{print_outcome, Outcome, OutputFormat};

pub fn run(args: AxisArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut sm10 = open(conn)?;
    let status = sm10
        .axis_status(args.axis)
        .map_err(|err| driver_error("status inquiry failed", err))?;

    let outcome = Outcome {
        status: Some(status.raw()),
        ..Outcome::new("status", args.axis)
    };
    print_outcome(&outcome, format);
    Ok(SUCCESS)
}
