mod i2c_error;
