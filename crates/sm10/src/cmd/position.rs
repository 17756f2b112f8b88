use crate::cmd::{open, AxisArgs, ConnectionArgs};
use crate::exit::{driver_error, CliResult, SUCCESS};
use crate::output::{print_outcome, Outcome, OutputFormat};

pub fn run(args: AxisArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut sm10 = open(conn)?;
    let position = sm10
        .position_inquiry(args.axis)
        .map_err(|err| driver_error("position inquiry failed", err))?;

    let outcome = Outcome {
        position_um: Some(position),
        ..Outcome::new("position", args.axis)
    };
    print_outcome(&outcome, format);
    Ok(SUCCESS)
}
