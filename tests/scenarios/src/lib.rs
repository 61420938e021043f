//! End-to-end scenarios for the register map
//!
//! These mirror what the `regmap` binary does on a default run and when one of
//! the devices is left disabled.

#[cfg(test)]
pub mod tests {
	use regmap_core::{DeviceError, EmbeddedDevice, Reporting};
	use regmap_driver::{run, DriverConfig, DriverError};

	#[test]
	fn test_enabled_device_round_trip() -> Result<(), anyhow::Error> {
		let mut device = EmbeddedDevice::with_address("Device_0", 0x1000);
		device.set_reporting(Reporting::Silent);
		device.enable();

		let write = device.write_register(0x00, 0x1234)?;
		assert_eq!(write.to_string(), "Write 0x1234 to Device_0@0x00001000");
		assert_eq!(device.read_register(0x00), 0x1234);
		assert_eq!(device.snapshot().register(0x00), Some(0x1234));

		Ok(())
	}

	#[test]
	fn test_disabled_device_reports_error_and_stays_empty() -> Result<(), anyhow::Error> {
		let config = DriverConfig {
			count: 2,
			disabled: vec![1],
			dump: true,
			reporting: Reporting::Silent,
			..DriverConfig::default()
		};
		let mut out = Vec::new();
		let outcomes = run(&config, &mut out)?;

		assert!(outcomes[0].is_ok());
		assert!(matches!(
			outcomes[1].result,
			Err(DriverError::Device(DeviceError::NotEnabled { ref name })) if name == "Device_1"
		));

		let out = String::from_utf8(out)?;
		let mut lines = out.splitn(2, '\n');
		assert_eq!(lines.next(), Some("Error with Device_1: Device not enabled"));

		let dump: serde_json::Value = serde_json::from_str(lines.next().unwrap_or_default())?;
		assert_eq!(dump[1]["registers"], serde_json::json!({}));

		Ok(())
	}

	#[test]
	fn test_every_offset_reads_back_masked_values() -> Result<(), anyhow::Error> {
		let mut device = EmbeddedDevice::new("Device_0");
		device.set_reporting(Reporting::Silent);
		device.enable();

		let values = [0_i64, 1, 0xffff, 0x1_0000, 0xdead_beef, -1, i64::MAX, i64::MIN];
		for (offset, value) in (0u32..).step_by(4).zip(values) {
			device.write_register(offset, value)?;
			assert_eq!(device.read_register(offset), (value & 0xffff) as u16);
		}
		assert_eq!(device.read_register(0x400), 0);

		Ok(())
	}

	#[test]
	fn test_console_output_for_disabled_second_device() -> Result<(), anyhow::Error> {
		let config = DriverConfig {
			count: 2,
			disabled: vec![1],
			reporting: Reporting::Stdout,
			..DriverConfig::default()
		};
		let mut out = Vec::new();
		run(&config, &mut out)?;

		let out = String::from_utf8(out)?;
		let lines: Vec<_> = out.lines().collect();
		assert_eq!(
			lines,
			vec!["Write 0x1234 to Device_0@0x00001000", "Error with Device_1: Device not enabled"]
		);

		Ok(())
	}
}
