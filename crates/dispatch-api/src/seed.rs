//! Demo fleet registered at startup so the query endpoints have data
//! before any client registers a drone.

use dispatch_domain::{Drone, DroneDescriptor, MedicationDescriptor};
use dispatch_fleet::FleetRegistry;

/// Stand-in for a medication case picture; a real deployment would carry
/// actual base64-encoded JPEG data here.
const SAMPLE_CASE_IMAGE: &str = "c2FtcGxlLW1lZGljYXRpb24tY2FzZQ==";

/// Register the demo fleet.
///
/// # Errors
///
/// Fails on the first drone that cannot be built or registered; drones
/// registered before the failure stay registered.
pub fn seed_demo_fleet(registry: &FleetRegistry) -> anyhow::Result<()> {
    for descriptor in demo_fleet() {
        let serial = descriptor.serial_number.clone();
        let drone = Drone::from_descriptor(&descriptor)
            .map_err(|err| anyhow::anyhow!("demo drone {serial}: {err}"))?;
        registry
            .register(drone)
            .map_err(|err| anyhow::anyhow!("demo drone {serial}: {err}"))?;
    }

    Ok(())
}

fn demo_fleet() -> Vec<DroneDescriptor> {
    vec![
        drone(
            "DD-LW-0001",
            "Lightweight",
            150,
            vec![medication("Medication-A", "CODE_A", 20), medication("Medication-B", "CODE_B", 40)],
        ),
        drone(
            "DD-HW-0002",
            "Heavyweight",
            500,
            vec![
                medication("Medication-A", "CODE_A", 200),
                medication("Medication-B", "CODE_B", 80),
                medication("Medication-C", "CODE_C", 50),
            ],
        ),
        drone("DD-MW-0003", "Middleweight", 300, Vec::new()),
        drone(
            "DD-CW-0004",
            "Cruiserweight",
            400,
            vec![medication("Medication-C", "CODE_C", 300), medication("Medication-D", "CODE_D", 90)],
        ),
        drone("DD-LW-0005", "Lightweight", 125, Vec::new()),
    ]
}

fn drone(
    serial: &str,
    model: &str,
    weight_limit: u32,
    medications: Vec<MedicationDescriptor>,
) -> DroneDescriptor {
    DroneDescriptor {
        serial_number: serial.to_owned(),
        model: Some(model.to_owned()),
        weight_limit: Some(weight_limit),
        battery_capacity: Some(100),
        state: Some("IDLE".to_owned()),
        medications: if medications.is_empty() {
            None
        } else {
            Some(medications)
        },
    }
}

fn medication(name: &str, code: &str, weight: u32) -> MedicationDescriptor {
    MedicationDescriptor {
        name: name.to_owned(),
        code: code.to_owned(),
        weight,
        image: Some(SAMPLE_CASE_IMAGE.to_owned()),
    }
}
