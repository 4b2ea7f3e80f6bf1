#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, unreachable_pub)]
/*!

`signal-net`

A discrete-event simulator for combinational logic. Gates (IN, OUT, NOT, AND,
OR, XOR) live in a [netlist::Circuit] arena and are wired output-to-input with
[netlist::Circuit::connect]. Driving an IN gate with
[netlist::Circuit::set_input_state] pushes the new value depth-first through
every downstream gate before the call returns.

Gates can be grouped into named [component::Component]s which expose one
boundary pin per IN member. Everything observable can be captured as a
read-only snapshot with [netlist::Circuit::describe].

*/
#![doc = "## Simple Example\n```"]
#![doc = include_str!("../demos/nand.rs")]
#![doc = "\n```"]

pub mod circuit;
pub mod component;
pub mod describe;
pub mod error;
pub mod graph;
pub mod netlist;
pub mod sim;
pub mod util;

pub use error::{Error, Result};
