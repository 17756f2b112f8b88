use crate::cmd::{open, ConnectionArgs, SlotArgs};
use crate::exit::{driver_error, CliResult, SUCCESS};
use crate::output::{print_outcome, Outcome, OutputFormat};

pub fn run_store(args: SlotArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut sm10 = open(conn)?;
    let position = sm10
        .store_position(args.axis, args.slot)
        .map_err(|err| driver_error("store position failed", err))?;

    let outcome = Outcome {
        position_um: Some(position),
        slot: Some(args.slot),
        ..Outcome::new("store", args.axis)
    };
    print_outcome(&outcome, format);
    Ok(SUCCESS)
}

pub fn run_recall(args: SlotArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut sm10 = open(conn)?;
    let reply = sm10
        .approach_stored_position(args.axis, args.slot)
        .map_err(|err| driver_error("stored approach failed", err))?;

    let outcome = Outcome {
        slot: Some(args.slot),
        reply: Some(hex::encode(reply.as_bytes())),
        ..Outcome::new("recall", args.axis)
    };
    print_outcome(&outcome, format);
    Ok(SUCCESS)
}
