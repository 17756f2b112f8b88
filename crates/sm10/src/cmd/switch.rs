use crate::cmd::{open, ConnectionArgs, SwitchArgs, SwitchState};
use crate::exit::{driver_error, CliResult, SUCCESS};
use crate::output::{print_outcome, Outcome, OutputFormat};

pub fn run(args: SwitchArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let on = args.state == SwitchState::On;
    let mut sm10 = open(conn)?;
    let reply = sm10
        .axis_switch(args.axis, on)
        .map_err(|err| driver_error("axis switch failed", err))?;

    let command = if on { "switch-on" } else { "switch-off" };
    let outcome = Outcome {
        reply: Some(hex::encode(reply.as_bytes())),
        ..Outcome::new(command, args.axis)
    };
    print_outcome(&outcome, format);
    Ok(SUCCESS)
}
