use sm10_driver::Approach;
use tracing::debug;

use crate::cmd::{open, ConnectionArgs, MoveArgs};
use crate::exit::{driver_error, CliResult, SUCCESS};
use crate::output::{print_outcome, Outcome, OutputFormat};

fn approach_for(args: &MoveArgs) -> Approach {
    Approach {
        absolute: !args.relative,
        slow: !args.fast,
        reverse: args.reverse,
    }
}

pub fn run(args: MoveArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mode = approach_for(&args);
    debug!(axis = args.axis, position = args.position, ?mode, "approach");

    let mut sm10 = open(conn)?;
    let reply = sm10
        .approach_position(args.axis, args.position, mode)
        .map_err(|err| driver_error("approach failed", err))?;

    let outcome = Outcome {
        position_um: Some(args.position),
        reply: Some(hex::encode(reply.as_bytes())),
        ..Outcome::new("move", args.axis)
    };
    print_outcome(&outcome, format);
    Ok(SUCCESS)
}
