// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod charts;
pub mod dashboard;
pub mod exporter;
pub mod importer;
pub mod notifications;
pub mod profile;
pub mod transactions;
