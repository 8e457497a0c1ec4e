/* Copyright 2020 @TwoCookingMice */

pub mod png_utils;
