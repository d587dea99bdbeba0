// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 14 October 2026

use super::client::Client;
use anyhow::Result;
use clap::Parser;
use fnbench::server::reflection::{FieldDescriptor, MessageDescriptor};

/// Print the services of a server, or the methods of one of them.
#[derive(Parser, Debug)]
#[clap()]
pub(crate) struct Args {
    /// Address of the server.
    #[clap(short, long, default_value = "127.0.0.1:50051")]
    addr: String,

    /// Service to describe. Every service is described when left out.
    #[clap(short, long)]
    service: Option<String>,
}

pub(super) fn describe(config: Args) -> Result<()> {
    let client = Client::new(&config.addr);

    let services = match config.service {
        Some(service) => vec![service],
        None => client.list_services()?,
    };

    for name in services {
        let service = client.describe_service(&name)?;
        match &service.description {
            Some(description) => println!("{} ({})", service.name, description),
            None => println!("{}", service.name),
        }

        for method in &service.methods {
            println!(
                "\t{:40}: {} -> {}",
                method.name, method.input.name, method.output.name
            );
            print_fields(&method.input);
            print_fields(&method.output);
        }
        println!();
    }

    Ok(())
}

fn print_fields(message: &MessageDescriptor) {
    for field in &message.fields {
        println!(
            "\t\t{:38}: {}",
            format!("{}.{}", message.name, field.name),
            label(field)
        );
    }
}

fn label(field: &FieldDescriptor) -> String {
    let mut label = format!("{} = {}", field.kind, field.number);
    if field.repeated {
        label = format!("repeated {}", label);
    } else if field.optional {
        label = format!("optional {}", label);
    }
    label
}
