use lsreply_bus::LoopbackBus;
use lsreply_reply::{check_for_subscription_and_process, parse_and_validate, post_subscription};

use crate::cmd::SubscribeArgs;
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_report, OutputFormat, Report};

pub fn run(args: SubscribeArgs, format: OutputFormat) -> CliResult<i32> {
    let post = match &args.post {
        Some(text) => Some(
            parse_and_validate(text)
                .ok_or_else(|| CliError::new(USAGE, "--post is not valid JSON"))?,
        ),
        None => None,
    };

    let bus = LoopbackBus::new();
    let message = bus.message(&args.path, &args.method, &args.payload);
    let requested = message.is_subscription();
    let subscribed = check_for_subscription_and_process(&bus, &message);

    if let Some(post) = &post {
        post_subscription(&bus, &args.path, &args.method, post);
    }

    let report = Report::new("subscribe", subscribed.to_string())
        .field("path", args.path.clone())
        .field("method", args.method.clone())
        .field("subscription_request", requested)
        .field("subscribed", subscribed)
        .field("delivered", bus.posts().len());
    print_report(&report, format);

    Ok(SUCCESS)
}
