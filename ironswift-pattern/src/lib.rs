/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # IronSwift Pattern
//!
//! Pattern grammar and character-class validation for the IronSwift engine.
//!
//! A pattern describes the layout of one field type. The same grammar serves
//! two purposes:
//! - **Parser patterns** tell the splitter where one component ends and the
//!   next begins (separators, fixed widths, optional and repeated groups)
//! - **Validator patterns** attach a character class and a length rule to
//!   every component
//!
//! ## Grammar
//!
//! ```text
//! pattern   := item*
//! item      := literal | component | group
//! literal   := '/' | ':' | '$'          (slash, colon, line break)
//! component := length? class
//! length    := N '!'                    (exactly N)
//!            | N '*' M?                 (up to N lines of up to M)
//!            | N                        (up to N)
//! group     := '[' item+ ']' ('*' N)?   (optional, repeatable up to N times)
//! ```
//!
//! For example the account and address block of an ordering customer reads
//! `[/34x$]35x[$35x]*3`.

pub mod charclass;
pub mod grammar;

pub use charclass::{CharClass, ComponentRule, Length};
pub use grammar::{ComponentToken, Group, MAX_SLOTS, Pattern, Separator, Slot, Stops, Token};
