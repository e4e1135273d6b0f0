// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod html_scanner;
#[cfg(test)]
mod html_scanner_test;
pub mod page_engine;
